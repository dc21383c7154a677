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

//! Ordered-key and equality support.
//!
//! B-tree style access paths only need a three-way comparison, and the
//! search tree needs an equality test to detect unchanged bounding keys.

use period_core::Period;
use std::cmp::Ordering;

/// Three-way comparison of two periods, returning `-1`, `0` or `1`.
///
/// The empty period sorts first; otherwise periods order by `first`, then
/// by `next`.
///
/// # Examples
///
/// ```rust
/// # use period_core::{Period, Timestamp};
/// # use period_index::keys::compare;
///
/// let t = Timestamp::from_micros;
/// let a = Period::new(t(-10), t(0)).unwrap();
/// assert_eq!(compare(Period::EMPTY, a), -1);
/// assert_eq!(compare(a, a), 0);
/// ```
#[inline]
pub fn compare(a: Period, b: Period) -> i32 {
    match a.cmp(&b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Returns `true` if two keys are the same period.
#[inline]
pub fn same(a: Period, b: Period) -> bool {
    a == b
}
