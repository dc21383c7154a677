// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Period Index
//!
//! Support functions that let a generalized search tree (R-tree style)
//! index periods. The host tree owns pages, locking and persistence; this
//! crate supplies the five pure callbacks it needs:
//!
//! - `bounding`: the covering period of a set of keys, stored as the key of
//!   an internal node.
//! - `consistent`: the exact leaf test and the conservative internal test for
//!   each indexed operator, selected by `Strategy` or by raw strategy number.
//! - `penalty`: the cost of growing a subtree's bound to admit a new key.
//! - `split`: the partition of an overflowing node into two groups.
//! - `keys`: three-way comparison and equality for ordered access paths.
//!
//! Every callback is a pure function of its inputs, so concurrent callers
//! need no coordination.
//!
//! ## Example
//!
//! ```rust
//! use period_core::{Period, Timestamp};
//! use period_index::{Strategy, bounding, consistent, pick_split};
//!
//! let t = Timestamp::from_micros;
//! let keys = [
//!     Period::new(t(0), t(10)).unwrap(),
//!     Period::new(t(5), t(15)).unwrap(),
//!     Period::new(t(90), t(99)).unwrap(),
//! ];
//!
//! let bound = bounding(&keys);
//! let query = Period::new(t(20), t(30)).unwrap();
//! // The bound overlaps the query, so the subtree must be searched...
//! assert!(consistent(bound, query, Strategy::Overlaps, false).unwrap());
//! // ...even though no leaf matches.
//! assert!(keys.iter().all(|k| !consistent(*k, query, Strategy::Overlaps, true).unwrap()));
//!
//! let entries: Vec<_> = keys.iter().copied().zip(0..).collect();
//! let split = pick_split(&entries).unwrap();
//! assert_eq!(split.right(), &[2]);
//! ```

pub mod bounding;
pub mod consistent;
pub mod error;
pub mod keys;
pub mod penalty;
pub mod split;

#[cfg(test)]
mod tree;

pub use bounding::bounding;
pub use consistent::{Query, Strategy, consistent, consistent_code};
pub use error::{IndexError, IndexResult};
pub use penalty::penalty;
pub use split::{Split, pick_split};
