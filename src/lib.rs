//! This crate provides an ordered Binary Search Tree (BST) mapping keys to
//! values, in two flavors:
//!
//! - `functional::Tree` never changes once built. `insert` and `delete`
//!   return new trees and every older tree stays valid.
//! - `owned::Tree` is changed in place through `&mut self`.
//!
//! Both are enabled by default and can be turned off individually with the
//! `functional` and `owned` cargo features.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Keys are unique: inserting a key that is already present replaces its
//! value. A set of keys is just a tree whose values are `()`.
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). These trees don't
//! rebalance, so the height depends entirely on the order of inserts and
//! deletes: inserting sorted keys builds a tree as tall as it is long. BSTs
//! also naturally support sorted iteration by visiting the left subtree,
//! then the subtree root, then the right subtree.
//!
//! ## Deleting
//!
//! Deleting a node with no children just removes it and deleting a node
//! with one child puts that child in its place. A node with two children
//! is replaced by its in-order successor, the smallest node in its right
//! subtree.
//!
//! ## Key order
//!
//! `K`'s `Ord` implementation must be a consistent total order. If it
//! isn't, the trees keep working but where entries end up is unspecified.
//! `check_order` on either tree reports whether an in-order walk still
//! yields strictly increasing keys.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
#[cfg(any(feature = "functional", feature = "owned"))]
mod util;

#[cfg(feature = "functional")]
pub mod functional;
#[cfg(feature = "owned")]
pub mod owned;

pub use error::OrderError;
