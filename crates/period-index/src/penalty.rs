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

//! Insertion penalty.
//!
//! When a new entry descends the tree, the host asks for the penalty of
//! each candidate subtree and follows the cheapest one. The penalty is the
//! growth of the subtree's bounding period, measured on a scaled-down size so
//! that spans reaching the infinity sentinels still fit in an `i64`.

use period_core::Period;

/// Divisor applied to both endpoints before measuring a period.
///
/// Dividing first keeps `next / K - first / K` inside `i64` even for
/// `[-infinity, infinity)`; any `K >= 2` is enough.
pub const SIZE_SCALE: i64 = 10;

const _: () = assert!(SIZE_SCALE >= 2);

/// Returns the scaled size of a period, `next / K - first / K`.
///
/// The empty period has size zero. The result is never negative.
///
/// # Examples
///
/// ```rust
/// # use period_core::{Period, Timestamp};
/// # use period_index::penalty::approximate_size;
///
/// let p = Period::new(Timestamp::from_micros(0), Timestamp::from_micros(100)).unwrap();
/// assert_eq!(approximate_size(p), 10);
/// ```
#[inline]
pub fn approximate_size(period: Period) -> i64 {
    period.end().as_micros() / SIZE_SCALE - period.start().as_micros() / SIZE_SCALE
}

/// Returns how much `existing` would grow to admit `candidate`.
///
/// Lower is better. Ties are left to the caller.
///
/// # Examples
///
/// ```rust
/// # use period_core::{Period, Timestamp};
/// # use period_index::penalty::penalty;
///
/// let t = Timestamp::from_micros;
/// let node = Period::new(t(0), t(100)).unwrap();
/// assert_eq!(penalty(node, Period::new(t(10), t(20)).unwrap()), 0.0);
/// assert_eq!(penalty(node, Period::new(t(50), t(200)).unwrap()), 10.0);
/// ```
#[inline]
pub fn penalty(existing: Period, candidate: Period) -> f64 {
    let grown = existing.span(candidate);
    (approximate_size(grown) - approximate_size(existing)) as f64
}
