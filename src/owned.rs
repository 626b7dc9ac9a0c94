//! A BST that is updated in place. Every node has exactly one owner (its
//! parent, or the `Tree` for the root) so `insert` and `delete` can rewire
//! the nodes directly instead of rebuilding the path to them.
//!
//! It follows the same rules as the persistent `functional::Tree`:
//! inserting an existing key overwrites its value and deleting a node with
//! two children promotes its in-order successor.
//!
//! # Examples
//!
//! ```
//! use ordtree::owned::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.find(&1), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! let old_value = tree.insert(1, 3);
//! assert_eq!(old_value, Some(2));
//! assert_eq!(tree.find(&1), Some(&3));
//!
//! // Deleting a node returns its value.
//! let deleted_value = tree.delete(&1);
//!
//! assert_eq!(deleted_value, Some(3));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use tracing::trace;

use crate::error::OrderError;
use crate::util;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// An unbalanced Binary Search Tree that owns its nodes and is modified in
/// place.
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    // Dropping the root directly would recurse once per level.
    fn drop(&mut self) {
        let mut stack: Vec<_> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// One step of cloning a tree without recursing.
enum CloneStep<'a, K, V> {
    /// Clone the subtree under this link, leaving the copy on the built stack.
    Visit(Option<&'a Node<K, V>>),
    /// Both children of this node are on the built stack (right on top).
    Assemble(&'a Node<K, V>),
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    // Copies bottom-up with explicit stacks, for the same reason as `drop`.
    fn clone(&self) -> Self {
        let mut steps = vec![CloneStep::Visit(self.root.as_deref())];
        let mut built: Vec<Link<K, V>> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                CloneStep::Visit(None) => built.push(None),
                CloneStep::Visit(Some(node)) => {
                    steps.push(CloneStep::Assemble(node));
                    steps.push(CloneStep::Visit(node.right.as_deref()));
                    steps.push(CloneStep::Visit(node.left.as_deref()));
                }
                CloneStep::Assemble(node) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(Node {
                        key: node.key.clone(),
                        value: node.value.clone(),
                        left,
                        right,
                    })));
                }
            }
        }
        Self {
            root: built.pop().flatten(),
            len: self.len,
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Some(&2));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Like [`find`][Tree::find] but lets the value be changed in place.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Whether a node with the given key is in this tree.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites its value and returns the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1, 2), None);
    /// assert_eq!(tree.find(&1), Some(&2));
    ///
    /// assert_eq!(tree.insert(1, 3), Some(2));
    /// assert_eq!(tree.find(&1), Some(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let replaced = Node::insert_at(&mut self.root, key, value);
        if replaced.is_none() {
            self.len += 1;
        }
        trace!(replaced = replaced.is_some(), len = self.len, "insert");
        replaced
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    /// let inserted_value = tree.delete(&1);
    ///
    /// assert_eq!(inserted_value, Some(2));
    /// assert_eq!(tree.find(&1), None);
    /// assert_eq!(tree.delete(&1), None);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let deleted = Node::delete_at(&mut self.root, key);
        if deleted.is_some() {
            self.len -= 1;
        }
        trace!(found = deleted.is_some(), len = self.len, "delete");
        deleted
    }

    /// Whether this tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// How many nodes are in this tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gets the height of this tree. An empty tree has a height of 0 and a
    /// single node has a height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// The entry with the smallest key, if any.
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// The entry with the largest key, if any.
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Iterates over the entries of this tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
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
    /// increasing keys. This only fails when `K`'s `Ord` implementation
    /// isn't a consistent total order.
    pub fn check_order(&self) -> Result<(), OrderError>
    where
        K: Ord,
    {
        util::check_strictly_increasing(self.keys())
    }
}

impl<K, V> PartialEq for Tree<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
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

impl<K, V> Extend<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.take());
        iter
    }
}

/// An in-order iterator over the entries of a [`Tree`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An in-order iterator that moves the entries out of a [`Tree`].
pub struct IntoIter<K, V> {
    // Every node on the stack has already had its left child detached.
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node {
            key, value, right, ..
        } = *node;
        self.push_left_spine(right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        while self.next().is_some() {}
    }
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Inserts into the subtree hanging off `link`, returning the value that was replaced if the
    /// key was already there.
    fn insert_at(link: &mut Link<K, V>, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        match link {
            None => {
                *link = Some(Box::new(Self::new(key, value)));
                None
            }
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => Self::insert_at(&mut node.left, key, value),
                Ordering::Equal => Some(std::mem::replace(&mut node.value, value)),
                Ordering::Greater => Self::insert_at(&mut node.right, key, value),
            },
        }
    }

    /// Deletes `key` from the subtree hanging off `link`, returning its value.
    fn delete_at(link: &mut Link<K, V>, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let node = link.as_mut()?;
        match key.cmp(&node.key) {
            Ordering::Less => Self::delete_at(&mut node.left, key),
            Ordering::Greater => Self::delete_at(&mut node.right, key),
            Ordering::Equal => link.take().map(|node| {
                let (value, replacement) = node.unlink();
                *link = replacement;
                value
            }),
        }
    }

    /// Takes this node out of the tree, returning its value and the subtree that takes its place.
    fn unlink(self: Box<Self>) -> (V, Link<K, V>) {
        let Node {
            value, left, right, ..
        } = *self;
        let replacement = match (left, right) {
            (None, child) | (child, None) => child,
            // Two children: the successor (the smallest node on the right) takes over.
            (left, Some(right)) => {
                let (key, succ_value, rest) = right.pop_smallest();
                Some(Box::new(Node {
                    key,
                    value: succ_value,
                    left,
                    right: rest,
                }))
            }
        };
        (value, replacement)
    }

    /// Removes the smallest node of this subtree, returning its key and value and what remains of
    /// the subtree.
    fn pop_smallest(mut self: Box<Self>) -> (K, V, Link<K, V>) {
        match self.left.take() {
            None => {
                let Node {
                    key, value, right, ..
                } = *self;
                (key, value, right)
            }
            Some(left) => {
                let (key, value, rest) = left.pop_smallest();
                self.left = rest;
                (key, value, Some(self))
            }
        }
    }
}
