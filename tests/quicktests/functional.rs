use ordtree::functional::Tree;

use std::collections::{BTreeMap, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same entries in both. Returns `None` as soon
/// as the tree and the map disagree on their in-order contents.
fn do_ops<K, V>(
    ops: &[Op<K, V>],
    mut bst: Tree<K, V>,
    map: &mut BTreeMap<K, V>,
) -> Option<Tree<K, V>>
where
    K: Clone + Ord,
    V: PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst = bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                bst = bst.delete(k);
                map.remove(k);
            }
            Op::Iter => {
                if !bst.iter().eq(map.iter()) {
                    return None;
                }
            }
        }
    }

    Some(bst)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut map = BTreeMap::new();

    match do_ops(&ops, Tree::new(), &mut map) {
        Some(tree) => {
            tree.len() == map.len()
                && map.keys().all(|key| tree.find(key) == map.get(key))
                && tree.check_order().is_ok()
        }
        None => false,
    }
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree = tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree = tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn in_order_keys_strictly_increase(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let tree: Tree<_, _> = xs.into_iter().map(|x| (x, ())).collect();
    let tree = deletes.iter().fold(tree, |tree, k| tree.delete(k));

    let keys: Vec<_> = tree.keys().collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn insert_then_find(xs: Vec<(i8, i8)>, k: i8, v: i8) -> bool {
    let tree: Tree<_, _> = xs.into_iter().collect();
    tree.insert(k, v).find(&k) == Some(&v)
}

#[quickcheck]
fn delete_then_find(xs: Vec<(i8, i8)>, deletes: Vec<i8>) -> bool {
    let tree: Tree<_, _> = xs.into_iter().collect();
    let deleted = deletes.iter().fold(tree.clone(), |tree, k| tree.delete(k));

    // Deleted keys are gone and every other key keeps its value.
    deletes.iter().all(|k| deleted.find(k).is_none())
        && tree
            .iter()
            .filter(|(k, _)| !deletes.contains(*k))
            .all(|(k, v)| deleted.find(k) == Some(v))
}

#[quickcheck]
fn delete_is_idempotent(xs: Vec<(i8, i8)>, k: i8) -> bool {
    let tree: Tree<_, _> = xs.into_iter().collect();
    let once = tree.delete(&k);
    let twice = once.delete(&k);

    once == twice && once.keys().eq(twice.keys())
}

#[quickcheck]
fn insert_overwrites(xs: Vec<(i8, i8)>, k: i8, first: i8, second: i8) -> bool {
    let tree: Tree<_, _> = xs.into_iter().collect();
    let tree = tree.insert(k, first).insert(k, second);

    tree.find(&k) == Some(&second) && tree.keys().filter(|key| **key == k).count() == 1
}

#[quickcheck]
fn updates_leave_original_untouched(xs: Vec<(i8, i8)>, k: i8, v: i8) -> bool {
    let tree: Tree<_, _> = xs.into_iter().collect();
    let before: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();

    let _inserted = tree.insert(k, v);
    let _deleted = tree.delete(&k);

    before
        .iter()
        .all(|(key, value)| tree.find(key) == Some(value))
        && tree.len() == before.len()
}

#[test]
fn scenario() {
    crate::init_tracing();

    let tree = Tree::new()
        .insert(5, "e")
        .insert(3, "c")
        .insert(8, "h")
        .insert(1, "a")
        .insert(4, "d");
    assert_eq!(tree.find(&3), Some(&"c"));

    let tree = tree.delete(&5);
    assert_eq!(tree.find(&5), None);
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 8]);
}
