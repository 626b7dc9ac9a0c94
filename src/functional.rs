//! A Functional BST. This is modeled after a BST one would see in
//! a functional language like Haskell. Any operations that one would
//! expect to modify the tree (e.g. `insert` or `delete`) instead return
//! a new tree that references the untouched nodes of the original tree.
//!
//! Nodes are never mutated once built, so sharing them between versions
//! can't be observed. They're held behind [`Arc`] so a snapshot can be
//! read from many threads at once.
//!
//! # Examples
//!
//! ```
//! use ordtree::functional::Tree;
//!
//! let tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! // This `insert` returns a new tree!
//! let new_tree = tree.insert(1, 2);
//!
//! // The new tree has this new value but the old one doesn't.
//! assert_eq!(new_tree.find(&1), Some(&2));
//! assert_eq!(tree.find(&1), None);
//!
//! // Insert a new value for the same key gives yet another tree.
//! let newer_tree = new_tree.insert(1, 3);
//!
//! // And delete it for good measure.
//! let newest_tree = newer_tree.delete(&1);
//!
//! // All history is preserved.
//! assert_eq!(newest_tree.find(&1), None);
//! assert_eq!(newer_tree.find(&1), Some(&3));
//! assert_eq!(new_tree.find(&1), Some(&2));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp;
use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use tracing::trace;

use crate::error::OrderError;
use crate::util;

/// A Binary Search Tree. This can be used for inserting, finding,
/// and deleting keys and values. Note that this data structure is
/// functional - operations that would modify the tree instead
/// return a new tree.
///
/// The tree doesn't rebalance itself. Its shape is whatever the sequence
/// of inserts and deletes made it. Dropping the last handle to a tree
/// recurses once per level, so a very tall (e.g. built from sorted keys)
/// tree can overflow the stack when it's dropped.
pub enum Tree<K, V> {
    /// A marker for the empty pointer at the bottom of a subtree.
    Leaf,
    /// A `Node` that has a key, value, and two children (which are
    /// both `Tree`s). This enum trivially wraps the [`Node`] struct.
    Node(Node<K, V>),
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning a tree only bumps reference counts, so neither `K` nor `V`
/// needs to be `Clone`.
impl<K, V> Clone for Tree<K, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(n) => Self::Node(n.clone()),
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Leaf
    }

    /// Returns a new tree that includes a node
    /// containing the given key and value. If the key is already
    /// present its value is replaced and no node is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::functional::Tree;
    ///
    /// let tree = Tree::new();
    /// let new_tree = tree.insert(1, 2);
    /// let newer_tree = new_tree.insert(1, 3);
    ///
    /// // All history is preserved.
    /// assert_eq!(newer_tree.find(&1), Some(&3));
    /// assert_eq!(new_tree.find(&1), Some(&2));
    /// assert_eq!(tree.find(&1), None);
    /// assert_eq!(newer_tree.len(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> Self
    where
        K: cmp::Ord,
    {
        let tree = self.insert_below(key, value);
        trace!(replaced = tree.len() == self.len(), len = tree.len(), "insert");
        tree
    }

    fn insert_below(&self, key: K, value: V) -> Self
    where
        K: cmp::Ord,
    {
        match self {
            Self::Leaf => Self::Node(Node::new(key, value)),
            Self::Node(n) => Self::Node(n.insert(key, value)),
        }
    }

    /// Potentially finds the value associated with the given key
    /// in this tree. If no node has the corresponding key, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::functional::Tree;
    ///
    /// let tree = Tree::new();
    /// let tree = tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Some(&2));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, k: &K) -> Option<&V>
    where
        K: cmp::Ord,
    {
        match self {
            Self::Leaf => None,
            Self::Node(n) => n.find(k),
        }
    }

    /// Whether a node with the given key is in this tree.
    pub fn contains_key(&self, k: &K) -> bool
    where
        K: cmp::Ord,
    {
        self.find(k).is_some()
    }

    /// Returns a new tree without a node with the given key.
    /// If the tree contained a node with the key, it is removed.
    /// If the tree never contained a node with the key, the returned
    /// tree shares its root with this one.
    ///
    /// A node with two children is replaced by its in-order successor,
    /// the smallest node of its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::functional::Tree;
    ///
    /// let tree = Tree::new();
    /// let tree = tree.insert(1, 2);
    /// let newer_tree = tree.delete(&1);
    ///
    /// // All history is preserved.
    /// assert_eq!(newer_tree.find(&1), None);
    /// assert_eq!(tree.find(&1), Some(&2));
    /// ```
    pub fn delete(&self, k: &K) -> Self
    where
        K: cmp::Ord,
    {
        let deleted = match self {
            Self::Leaf => None,
            Self::Node(n) => n.delete(k),
        };
        trace!(found = deleted.is_some(), "delete");
        deleted.map_or_else(|| self.clone(), Child::into_tree)
    }

    /// Whether this tree has no nodes.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// How many nodes are in this tree.
    pub fn len(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Node(n) => n.len,
        }
    }

    /// Gets the height of this tree. A [`Leaf`][Tree::Leaf] has a height
    /// of 0 and a single node has a height of 1.
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Node(n) => n.height,
        }
    }

    /// The entry with the smallest key, if any.
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = match self {
            Self::Leaf => return None,
            Self::Node(n) => n,
        };
        while let Self::Node(left) = node.left() {
            node = left;
        }
        Some((node.key(), node.value()))
    }

    /// The entry with the largest key, if any.
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = match self {
            Self::Leaf => return None,
            Self::Node(n) => n,
        };
        while let Self::Node(right) = node.right() {
            node = right;
        }
        Some((node.key(), node.value()))
    }

    /// Iterates over the entries of this tree in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::functional::Tree;
    ///
    /// let tree: Tree<_, _> = vec![(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let entries: Vec<_> = tree.iter().collect();
    ///
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Iterates over the keys of this tree in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over the values of this tree in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Checks that an in-order walk of this tree yields strictly
    /// increasing keys.
    ///
    /// Trees built through [`insert`][Tree::insert] and
    /// [`delete`][Tree::delete] always pass this check as long as `K`'s
    /// `Ord` implementation is a consistent total order. If it isn't, the
    /// shape of the tree is unspecified and this reports where it went wrong.
    pub fn check_order(&self) -> Result<(), OrderError>
    where
        K: cmp::Ord,
    {
        util::check_strictly_increasing(self.keys())
    }
}

impl<K, V> PartialEq for Tree<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    /// Trees are equal when they hold the same entries, whatever their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for Tree<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: cmp::Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |tree, (k, v)| tree.insert(k, v))
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the entries of a [`Tree`].
///
/// It keeps the path to the next node on an explicit stack so that
/// walking a tall, list-shaped tree doesn't recurse.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a Tree<K, V>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree);
        iter
    }

    fn push_left_spine(&mut self, mut tree: &'a Tree<K, V>) {
        while let Tree::Node(n) = tree {
            self.stack.push(n);
            tree = n.left();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

struct Child<K, V>(Arc<Tree<K, V>>);
impl<K, V> Clone for Child<K, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
impl<K, V> Child<K, V> {
    fn new() -> Self {
        Self(Arc::new(Tree::new()))
    }

    fn from_node(node: Node<K, V>) -> Self {
        Self(Arc::new(Tree::Node(node)))
    }

    /// Takes the tree out of this child, only copying the root when
    /// another tree still shares it.
    fn into_tree(self) -> Tree<K, V> {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }

    fn height(&self) -> usize {
        self.0.height()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&self, key: K, value: V) -> Self
    where
        K: cmp::Ord,
    {
        Self(Arc::new(self.0.insert_below(key, value)))
    }

    fn find(&self, k: &K) -> Option<&V>
    where
        K: cmp::Ord,
    {
        self.0.find(k)
    }

    /// Returns the new child if a node with the key was deleted from this
    /// subtree, or `None` if the key isn't in it.
    fn delete(&self, k: &K) -> Option<Self>
    where
        K: cmp::Ord,
    {
        match self.0.as_ref() {
            Tree::Leaf => None,
            Tree::Node(n) => n.delete(k),
        }
    }
}

/// A `Node` has a key that is used for searching/sorting and a value
/// that is associated with that key. It always has two children although
/// those children may be [`Leaf`][Tree::Leaf]s.
pub struct Node<K, V> {
    key: Arc<K>,
    value: Arc<V>,
    left: Child<K, V>,
    right: Child<K, V>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,

    /// How many nodes are in the subtree rooted at this node, itself included.
    len: usize,
}

/// Manual implementation of `Clone` so we don't clone references when the generic parameters
/// aren't `Clone` themselves.
///
/// Note the comment on generic structs in
/// [the docs][<https://doc.rust-lang.org/std/clone/trait.Clone.html#derivable>].
impl<K, V> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        Self {
            height: self.height,
            key: Arc::clone(&self.key),
            left: self.left.clone(),
            len: self.len,
            right: self.right.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

impl<K, V> Node<K, V> {
    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value associated with this node's key.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The subtree holding every key smaller than this node's key.
    pub fn left(&self) -> &Tree<K, V> {
        &self.left.0
    }

    /// The subtree holding every key larger than this node's key.
    pub fn right(&self) -> &Tree<K, V> {
        &self.right.0
    }

    /// Construct a new `Node` with the given `key` and `value.
    fn new(key: K, value: V) -> Self {
        Self {
            height: 1,
            key: Arc::new(key),
            left: Child::new(),
            len: 1,
            right: Child::new(),
            value: Arc::new(value),
        }
    }

    /// Assembles a node from shared parts, working out its height and size.
    fn from_parts(key: Arc<K>, value: Arc<V>, left: Child<K, V>, right: Child<K, V>) -> Self {
        Self {
            height: left.height().max(right.height()) + 1,
            key,
            len: left.len() + right.len() + 1,
            left,
            right,
            value,
        }
    }

    /// Create a new Node with the same key/value as this node
    /// but with the given children.
    fn clone_with_children(&self, left_child: Child<K, V>, right_child: Child<K, V>) -> Self {
        Self::from_parts(
            Arc::clone(&self.key),
            Arc::clone(&self.value),
            left_child,
            right_child,
        )
    }

    fn insert(&self, key: K, value: V) -> Self
    where
        K: cmp::Ord,
    {
        match key.cmp(&self.key) {
            cmp::Ordering::Less => {
                let new_left = self.left.insert(key, value);
                self.clone_with_children(new_left, self.right.clone())
            }
            // Only the value changes. The key already stored is kept
            // since it compared equal.
            cmp::Ordering::Equal => Self {
                value: Arc::new(value),
                ..self.clone()
            },
            cmp::Ordering::Greater => {
                let new_right = self.right.insert(key, value);
                self.clone_with_children(self.left.clone(), new_right)
            }
        }
    }

    fn find(&self, k: &K) -> Option<&V>
    where
        K: cmp::Ord,
    {
        match k.cmp(&self.key) {
            cmp::Ordering::Less => self.left.find(k),
            cmp::Ordering::Equal => Some(&self.value),
            cmp::Ordering::Greater => self.right.find(k),
        }
    }

    /// Returns the subtree that replaces this node once `k` is deleted
    /// from it, or `None` if `k` isn't in this subtree.
    fn delete(&self, k: &K) -> Option<Child<K, V>>
    where
        K: cmp::Ord,
    {
        match k.cmp(&self.key) {
            cmp::Ordering::Less => {
                let new_left = self.left.delete(k)?;
                Some(Child::from_node(
                    self.clone_with_children(new_left, self.right.clone()),
                ))
            }
            cmp::Ordering::Equal => match (self.left.0.as_ref(), self.right.0.as_ref()) {
                (Tree::Leaf, Tree::Leaf) => Some(Child::new()),
                (Tree::Leaf, Tree::Node(_)) => Some(self.right.clone()),
                (Tree::Node(_), Tree::Leaf) => Some(self.left.clone()),

                // If we have two children we have to figure out
                // which node to promote. We choose here this node's
                // successor. That is, the smallest node in this node's
                // right subtree.
                (Tree::Node(_), Tree::Node(right_child)) => {
                    let (succ_key, succ_val, new_right) = right_child.delete_smallest();
                    Some(Child::from_node(Node::from_parts(
                        succ_key,
                        succ_val,
                        self.left.clone(),
                        new_right,
                    )))
                }
            },
            cmp::Ordering::Greater => {
                let new_right = self.right.delete(k)?;
                Some(Child::from_node(
                    self.clone_with_children(self.left.clone(), new_right),
                ))
            }
        }
    }

    /// Returns the key and value of the smallest node and a new subtree without that smallest node.
    fn delete_smallest(&self) -> (Arc<K>, Arc<V>, Child<K, V>) {
        match self.left.0.as_ref() {
            Tree::Leaf => (
                Arc::clone(&self.key),
                Arc::clone(&self.value),
                self.right.clone(),
            ),
            Tree::Node(l) => {
                let (key, value, new_left) = l.delete_smallest();

                (
                    key,
                    value,
                    Child::from_node(self.clone_with_children(new_left, self.right.clone())),
                )
            }
        }
    }
}
