use std::cell::Cell;
use std::cmp::Ordering;

use ordtree::{functional, owned, OrderError};

thread_local! {
    static REVERSED: Cell<bool> = Cell::new(false);
}

/// A key whose order can be flipped after it's been put in a tree, which
/// breaks the consistency `Ord` is supposed to have.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Fickle(i32);

impl Ord for Fickle {
    fn cmp(&self, other: &Self) -> Ordering {
        let ord = self.0.cmp(&other.0);
        if REVERSED.with(Cell::get) {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl PartialOrd for Fickle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[test]
fn functional_tree_reports_inconsistent_order() {
    REVERSED.with(|r| r.set(false));
    let tree: functional::Tree<_, _> = (1..=5).map(|x| (Fickle(x), x)).collect();
    assert_eq!(tree.check_order(), Ok(()));

    REVERSED.with(|r| r.set(true));
    assert_eq!(
        tree.check_order(),
        Err(OrderError::OutOfOrder { position: 1 })
    );
    REVERSED.with(|r| r.set(false));
}

#[test]
fn owned_tree_reports_inconsistent_order() {
    REVERSED.with(|r| r.set(false));
    let tree: owned::Tree<_, _> = vec![(Fickle(3), 'c'), (Fickle(1), 'a'), (Fickle(2), 'b')]
        .into_iter()
        .collect();
    assert_eq!(tree.check_order(), Ok(()));

    REVERSED.with(|r| r.set(true));
    let err = tree.check_order().unwrap_err();
    assert_eq!(err, OrderError::OutOfOrder { position: 1 });
    assert_eq!(
        err.to_string(),
        "entry 1 is not greater than the entry before it"
    );
    REVERSED.with(|r| r.set(false));
}
