use ordtree::owned::Tree;

use std::collections::BTreeMap;

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a map, checking that every
/// operation returns what the map returns for it.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut BTreeMap<K, V>) -> bool
where
    K: Clone + Ord,
    V: PartialEq + Clone,
{
    ops.iter().all(|op| match op {
        Op::Insert(k, v) => bst.insert(k.clone(), v.clone()) == map.insert(k.clone(), v.clone()),
        Op::Remove(k) => bst.delete(k) == map.remove(k),
        Op::Iter => bst.iter().eq(map.iter()),
    })
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map)
        && tree.len() == map.len()
        && map.keys().all(|key| tree.find(key) == map.get(key))
        && tree.check_order().is_ok()
}

#[quickcheck]
fn into_iter_matches_map(xs: Vec<(i8, i8)>) -> bool {
    let tree: Tree<_, _> = xs.iter().copied().collect();
    let map: BTreeMap<_, _> = xs.into_iter().collect();

    tree.into_iter().eq(map.into_iter())
}

#[quickcheck]
fn matches_functional_tree(ops: Vec<Op<i8, i8>>) -> bool {
    let mut owned = Tree::new();
    let mut functional = ordtree::functional::Tree::new();

    for op in &ops {
        match *op {
            Op::Insert(k, v) => {
                owned.insert(k, v);
                functional = functional.insert(k, v);
            }
            Op::Remove(k) => {
                owned.delete(&k);
                functional = functional.delete(&k);
            }
            Op::Iter => {}
        }
    }

    // Same rules, so the same shape as well as the same entries.
    owned.iter().eq(functional.iter()) && owned.height() == functional.height()
}

#[quickcheck]
fn delete_is_idempotent(xs: Vec<(i8, i8)>, k: i8) -> bool {
    let mut tree: Tree<_, _> = xs.into_iter().collect();
    tree.delete(&k);
    let once = tree.clone();

    tree.delete(&k).is_none() && tree == once
}

#[test]
fn scenario() {
    crate::init_tracing();

    let mut tree: Tree<_, _> = vec![(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")]
        .into_iter()
        .collect();
    assert_eq!(tree.find(&3), Some(&"c"));

    assert_eq!(tree.delete(&5), Some("e"));
    assert_eq!(tree.find(&5), None);
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 8]);
}
