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

//! # Node Splitter
//!
//! Partitions the entries of an overflowing node into two non-empty groups
//! and reports the bounding period of each group.
//!
//! The heuristic works against the page bounding `U` of all entries:
//!
//! 1. If every entry equals `U`, no geometric split can help; the first half
//!    of the entries goes left and the rest goes right.
//! 2. Otherwise each entry is sent to the side of `U` it hugs: left when its
//!    distance to `U.first` is strictly smaller than its distance to
//!    `U.next`, right otherwise.
//! 3. If that leaves one side empty, the entries are stably sorted by
//!    [`approximate_size`] and distributed again by the same rule, now
//!    breaking exact ties towards the side with fewer entries.
//!
//! Distances are computed in `i128`, so endpoints at the infinity sentinels
//! cannot overflow. Empty entries have no position on the line: they never
//! widen a side and join the smaller side (the left one on a tie).
//!
//! Given identical input the result is deterministic.

use crate::{
    bounding::bounding,
    error::{IndexError, IndexResult},
    penalty::approximate_size,
};
use period_core::Period;
use std::cmp::Ordering;

/// The outcome of a node split.
///
/// Both groups are non-empty, every input ordinal appears in exactly one of
/// them, and each bounding period covers every entry of its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<O> {
    left: Vec<O>,
    left_bounding: Period,
    right: Vec<O>,
    right_bounding: Period,
}

impl<O> Split<O> {
    /// Returns the ordinals of the left group, in placement order.
    #[inline]
    pub fn left(&self) -> &[O] {
        &self.left
    }

    /// Returns the bounding period of the left group.
    #[inline]
    pub fn left_bounding(&self) -> Period {
        self.left_bounding
    }

    /// Returns the ordinals of the right group, in placement order.
    #[inline]
    pub fn right(&self) -> &[O] {
        &self.right
    }

    /// Returns the bounding period of the right group.
    #[inline]
    pub fn right_bounding(&self) -> Period {
        self.right_bounding
    }

    /// Consumes the split, yielding `(left, left_bounding, right, right_bounding)`.
    #[inline]
    pub fn into_parts(self) -> (Vec<O>, Period, Vec<O>, Period) {
        (self.left, self.left_bounding, self.right, self.right_bounding)
    }
}

/// How an exact distance tie is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TieBreak {
    Right,
    Smaller,
}

/// A group under construction.
#[derive(Debug)]
struct Side<O> {
    members: Vec<O>,
    bounding: Period,
}

impl<O> Side<O> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            bounding: Period::EMPTY,
        }
    }

    #[inline]
    fn push(&mut self, period: Period, ordinal: O) {
        self.bounding = self.bounding.span(period);
        self.members.push(ordinal);
    }

    #[inline]
    fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Splits the entries of an overflowing node in two.
///
/// Each entry pairs a key with an opaque ordinal (typically its position in
/// the node); the ordinals are returned grouped by side.
///
/// # Errors
///
/// Returns [`IndexError::TooFewEntries`] if fewer than two entries are given.
///
/// # Examples
///
/// ```rust
/// # use period_core::{Period, Timestamp};
/// # use period_index::split::pick_split;
///
/// let t = Timestamp::from_micros;
/// let entries = [
///     (Period::new(t(0), t(10)).unwrap(), 0),
///     (Period::new(t(90), t(100)).unwrap(), 1),
///     (Period::new(t(5), t(20)).unwrap(), 2),
///     (Period::new(t(80), t(95)).unwrap(), 3),
/// ];
///
/// let split = pick_split(&entries).unwrap();
/// assert_eq!(split.left(), &[0, 2]);
/// assert_eq!(split.right(), &[1, 3]);
/// assert_eq!(split.left_bounding(), Period::new(t(0), t(20)).unwrap());
/// assert_eq!(split.right_bounding(), Period::new(t(80), t(100)).unwrap());
/// ```
pub fn pick_split<O: Copy>(entries: &[(Period, O)]) -> IndexResult<Split<O>> {
    let n = entries.len();
    if n < 2 {
        return Err(IndexError::TooFewEntries(n));
    }

    let page = bounding(entries.iter().map(|(period, _)| period));
    if entries.iter().all(|(period, _)| *period == page) {
        tracing::trace!(entries = n, %page, "all entries equal the page bound, splitting by position");
        return Ok(split_by_position(entries));
    }

    let (left, right) = distribute(entries.iter().copied(), page, TieBreak::Right);
    if !left.is_empty() && !right.is_empty() {
        tracing::trace!(left = left.len(), right = right.len(), "split by nearest page end");
        return Ok(finish(left, right));
    }

    tracing::debug!(
        entries = n,
        left = left.len(),
        right = right.len(),
        "one-sided split, redistributing by ascending size"
    );

    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|(period, _)| approximate_size(*period));
    let (left, right) = distribute(sorted.into_iter(), page, TieBreak::Smaller);
    if !left.is_empty() && !right.is_empty() {
        return Ok(finish(left, right));
    }

    tracing::warn!(
        entries = n,
        %page,
        "redistribution left one side empty, splitting by position"
    );
    Ok(split_by_position(entries))
}

/// Sends the first `n / 2` entries left and the rest right.
fn split_by_position<O: Copy>(entries: &[(Period, O)]) -> Split<O> {
    let (head, tail) = entries.split_at(entries.len() / 2);
    Split {
        left: head.iter().map(|(_, ordinal)| *ordinal).collect(),
        left_bounding: bounding(head.iter().map(|(period, _)| period)),
        right: tail.iter().map(|(_, ordinal)| *ordinal).collect(),
        right_bounding: bounding(tail.iter().map(|(period, _)| period)),
    }
}

fn distribute<O, I>(entries: I, page: Period, tie: TieBreak) -> (Side<O>, Side<O>)
where
    I: ExactSizeIterator<Item = (Period, O)>,
{
    let mut left = Side::with_capacity(entries.len());
    let mut right = Side::with_capacity(entries.len());

    for (period, ordinal) in entries {
        if goes_left(period, page, tie, left.len(), right.len()) {
            left.push(period, ordinal);
        } else {
            right.push(period, ordinal);
        }
    }

    (left, right)
}

#[inline]
fn goes_left(period: Period, page: Period, tie: TieBreak, left: usize, right: usize) -> bool {
    if period.is_empty() {
        return left <= right;
    }

    let to_first = i128::from(period.start().as_micros()) - i128::from(page.start().as_micros());
    let to_next = i128::from(page.end().as_micros()) - i128::from(period.end().as_micros());
    match to_first.cmp(&to_next) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => match tie {
            TieBreak::Right => false,
            TieBreak::Smaller => left <= right,
        },
    }
}

#[inline]
fn finish<O>(left: Side<O>, right: Side<O>) -> Split<O> {
    Split {
        left: left.members,
        left_bounding: left.bounding,
        right: right.members,
        right_bounding: right.bounding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;
    use period_core::Timestamp;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn p(first: i64, next: i64) -> Period {
        Period::new(Timestamp::from_micros(first), Timestamp::from_micros(next)).unwrap()
    }

    fn numbered(periods: &[Period]) -> Vec<(Period, usize)> {
        periods.iter().copied().zip(0..).collect()
    }

    /// Checks the structural guarantees every split must hold.
    fn assert_valid_split(entries: &[(Period, usize)], split: &Split<usize>) {
        assert!(!split.left().is_empty(), "left side is empty");
        assert!(!split.right().is_empty(), "right side is empty");

        let mut seen = FixedBitSet::with_capacity(entries.len());
        for &ordinal in split.left().iter().chain(split.right()) {
            assert!(!seen.put(ordinal), "ordinal {} placed twice", ordinal);
        }
        assert_eq!(seen.count_ones(..), entries.len());

        let left = bounding(split.left().iter().map(|&i| entries[i].0));
        let right = bounding(split.right().iter().map(|&i| entries[i].0));
        assert_eq!(split.left_bounding(), left);
        assert_eq!(split.right_bounding(), right);
    }

    #[test]
    fn test_too_few_entries() {
        assert_eq!(
            pick_split::<usize>(&[]),
            Err(IndexError::TooFewEntries(0))
        );
        assert_eq!(
            pick_split(&[(p(0, 1), 0usize)]),
            Err(IndexError::TooFewEntries(1))
        );
    }

    #[test]
    fn test_split_by_side() {
        let entries = numbered(&[p(0, 10), p(90, 100), p(5, 20), p(80, 95)]);
        let split = pick_split(&entries).unwrap();
        assert_valid_split(&entries, &split);
        assert_eq!(split.left(), &[0, 2]);
        assert_eq!(split.right(), &[1, 3]);
        assert_eq!(split.left_bounding(), p(0, 20));
        assert_eq!(split.right_bounding(), p(80, 100));
    }

    #[test]
    fn test_identical_entries_split_by_position() {
        let entries = numbered(&[p(3, 7); 5]);
        let split = pick_split(&entries).unwrap();
        assert_valid_split(&entries, &split);
        assert_eq!(split.left(), &[0, 1]);
        assert_eq!(split.right(), &[2, 3, 4]);
        assert_eq!(split.left_bounding(), p(3, 7));
        assert_eq!(split.right_bounding(), p(3, 7));
    }

    #[test]
    fn test_all_empty_entries_split_by_position() {
        let entries = numbered(&[Period::EMPTY; 4]);
        let split = pick_split(&entries).unwrap();
        assert_eq!(split.left(), &[0, 1]);
        assert_eq!(split.right(), &[2, 3]);
        assert_eq!(split.left_bounding(), Period::EMPTY);
        assert_eq!(split.right_bounding(), Period::EMPTY);
    }

    #[test]
    fn test_one_sided_pass_is_redistributed() {
        // Every entry touches the right end of the page, so the first pass
        // sends everything right.
        let entries = numbered(&[p(0, 100), p(50, 100), p(0, 100)]);
        let split = pick_split(&entries).unwrap();
        assert_valid_split(&entries, &split);
        assert_eq!(split.left(), &[0, 2]);
        assert_eq!(split.right(), &[1]);
        assert_eq!(split.left_bounding(), p(0, 100));
        assert_eq!(split.right_bounding(), p(50, 100));
    }

    #[test]
    fn test_nested_symmetric_entries_alternate() {
        let entries = numbered(&[p(0, 100), p(10, 90), p(20, 80), p(30, 70)]);
        let split = pick_split(&entries).unwrap();
        assert_valid_split(&entries, &split);
        assert_eq!(split.left(), &[3, 1]);
        assert_eq!(split.right(), &[2, 0]);
        assert_eq!(split.left_bounding(), p(10, 90));
        assert_eq!(split.right_bounding(), p(0, 100));
    }

    #[test]
    fn test_empty_entries_do_not_widen() {
        let entries = numbered(&[Period::EMPTY, p(0, 10), p(0, 10)]);
        let split = pick_split(&entries).unwrap();
        assert_valid_split(&entries, &split);
        assert_eq!(split.left(), &[0]);
        assert_eq!(split.left_bounding(), Period::EMPTY);
        assert_eq!(split.right(), &[1, 2]);
        assert_eq!(split.right_bounding(), p(0, 10));
    }

    #[test]
    fn test_infinite_endpoints() {
        let t = Timestamp::from_micros;
        let entries = numbered(&[
            Period::new(Timestamp::NEG_INFINITY, t(0)).unwrap(),
            Period::new(t(0), Timestamp::INFINITY).unwrap(),
            Period::new(Timestamp::NEG_INFINITY, Timestamp::INFINITY).unwrap(),
        ]);
        let split = pick_split(&entries).unwrap();
        assert_valid_split(&entries, &split);
        assert_eq!(split.left(), &[0]);
        assert_eq!(split.right(), &[1, 2]);
    }

    #[test]
    fn test_into_parts() {
        let entries = numbered(&[p(0, 1), p(9, 10)]);
        let (left, left_bounding, right, right_bounding) =
            pick_split(&entries).unwrap().into_parts();
        assert_eq!((left, left_bounding), (vec![0], p(0, 1)));
        assert_eq!((right, right_bounding), (vec![1], p(9, 10)));
    }

    #[test]
    fn test_randomized_splits_are_valid_and_deterministic() {
        let mut rng = StdRng::seed_from_u64(0x5917);
        for _ in 0..1_000 {
            let n = rng.gen_range(2..40);
            // A narrow coordinate range produces plenty of duplicates and ties.
            let periods: Vec<Period> = (0..n)
                .map(|_| {
                    if rng.gen_bool(0.1) {
                        Period::EMPTY
                    } else {
                        let first = rng.gen_range(0..8);
                        p(first, first + rng.gen_range(1..8))
                    }
                })
                .collect();
            let entries = numbered(&periods);

            let split = pick_split(&entries).unwrap();
            assert_valid_split(&entries, &split);
            assert_eq!(pick_split(&entries).unwrap(), split);
        }
    }

    #[test]
    fn test_randomized_equidistant_entries() {
        let mut rng = StdRng::seed_from_u64(0xe0d1);
        for _ in 0..200 {
            let n = rng.gen_range(2..20);
            let center = rng.gen_range(-1_000..1_000);
            let periods: Vec<Period> = (0..n)
                .map(|_| {
                    let radius = rng.gen_range(1..50);
                    p(center - radius, center + radius)
                })
                .collect();
            let entries = numbered(&periods);
            assert_valid_split(&entries, &pick_split(&entries).unwrap());
        }
    }
}
