//! Errors reported by the trees in this crate.
//!
//! Inserting, finding and deleting never fail. The only error comes from
//! asking a tree whether its keys are still in order.

/// A tree's keys aren't in strictly increasing order when walked in order.
///
/// This only happens when the key type's `Ord` implementation isn't a
/// consistent total order. The tree doesn't try to recover from that.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OrderError {
    /// The entry at `position` (counting from 0 in iteration order) isn't
    /// greater than the entry before it.
    #[error("entry {position} is not greater than the entry before it")]
    OutOfOrder {
        /// In-order index of the first offending entry.
        position: usize,
    },
}
