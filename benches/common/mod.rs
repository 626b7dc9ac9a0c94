//! Tree builders shared by the benches.

/// The keys `0..num_nodes` ordered so that inserting them one by one into an unbalanced tree
/// builds a balanced one: each range's middle key goes in before either half.
pub fn balanced_order(num_nodes: usize) -> Vec<i32> {
    let mut order = Vec::with_capacity(num_nodes);
    let mut ranges = vec![(0, num_nodes as i32)];
    while let Some((lo, hi)) = ranges.pop() {
        if lo < hi {
            let mid = lo + (hi - lo) / 2;
            order.push(mid);
            ranges.push((mid + 1, hi));
            ranges.push((lo, mid));
        }
    }
    order
}
