//! AVL tree backed multiset and multimap collections for Rust.
//!
//! This crate provides [`AvlMultiset`] and [`AvlMultimap`], ordered containers that
//! accept duplicate keys:
//!
//! - [`AvlMultiset`] stores each distinct key once together with an occurrence count.
//! - [`AvlMultimap`] stores each distinct key once together with every value put under
//!   it, in insertion order.
//!
//! # Example
//!
//! ```
//! use avl_multi::{AvlMultimap, AvlMultiset};
//!
//! let mut words = AvlMultiset::new();
//! words.insert("apple");
//! words.insert("pear");
//! words.insert("apple");
//!
//! assert_eq!(words.count(&"apple"), 2);
//! assert_eq!(words.len(), 3);
//! assert_eq!(words.distinct_len(), 2);
//!
//! let mut scores = AvlMultimap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Alice", 92);
//!
//! // Values come back in the order they were put.
//! let alice: Vec<_> = scores.get(&"Alice").copied().collect();
//! assert_eq!(alice, [100, 92]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom orderings** - Keys (and multimap values) are ordered by a [`Comparator`],
//!   which may be [`Natural`] ordering or any `Fn(&T, &T) -> Ordering` closure
//! - **Fallible allocation** - Insertion has a `try_` form that reports [`AllocError`]
//!   and leaves the container exactly as it was; removal never allocates
//!
//! # Implementation
//!
//! Both collections share one AVL engine. Nodes live in an arena and refer to their
//! parent and children through stable handles, so rebalancing can walk upwards in O(1)
//! per step without reference cycles. Insertion performs at most one single or double
//! rotation; deletion may rotate at every level on the way back to the root.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod compare;
mod error;
mod raw;

pub mod avl_multimap;
pub mod avl_multiset;

pub use avl_multimap::AvlMultimap;
pub use avl_multiset::AvlMultiset;
pub use compare::{Comparator, Natural};
pub use error::AllocError;
