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

//! Bounding-interval aggregation.
//!
//! Internal nodes summarize their subtree by the smallest period covering
//! every entry below them. The reduction skips empty periods (they are the
//! identity of the covering union), which keeps it associative and
//! commutative: any permutation of the same entries yields the same bound.

use period_core::Period;
use std::borrow::Borrow;

/// Returns the smallest period covering every input period.
///
/// An empty input, or one made only of empty periods, yields
/// [`Period::EMPTY`].
///
/// # Examples
///
/// ```rust
/// # use period_core::{Period, Timestamp};
/// # use period_index::bounding::bounding;
///
/// let t = Timestamp::from_micros;
/// let periods = [
///     Period::new(t(10), t(20)).unwrap(),
///     Period::new(t(15), t(25)).unwrap(),
///     Period::new(t(100), t(200)).unwrap(),
/// ];
/// assert_eq!(bounding(&periods), Period::new(t(10), t(200)).unwrap());
/// assert_eq!(bounding(Vec::<Period>::new()), Period::EMPTY);
/// ```
pub fn bounding<I>(periods: I) -> Period
where
    I: IntoIterator,
    I::Item: Borrow<Period>,
{
    periods
        .into_iter()
        .fold(Period::EMPTY, |acc, period| acc.span(*period.borrow()))
}
