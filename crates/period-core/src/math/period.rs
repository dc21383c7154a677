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

use crate::{
    error::{PeriodError, PeriodResult},
    time::Timestamp,
};
use chrono::TimeDelta;
use smallvec::{SmallVec, smallvec};
use std::{
    cmp::{Ordering, max, min},
    ops::{BitAnd, Bound, Range, RangeBounds},
};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// A half-open period `[first, next)` over the [`Timestamp`] domain.
///
/// `first` is the first instant included in the period and `next` is the
/// first instant after it. Every empty period is stored in the same
/// canonical form, the pair `(0, 0)`, no matter which operation produced it.
///
/// # Invariants
///
/// Either `first < next`, or the period is exactly [`Period::EMPTY`].
///
/// # Ordering
///
/// The empty period sorts before every non-empty period. Non-empty periods are
/// ordered by `first`, then by `next`. This is a total order suitable for
/// B-tree keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    first: Timestamp,
    next: Timestamp,
}

impl Period {
    /// The canonical empty period.
    pub const EMPTY: Self = Period {
        first: Timestamp::EPOCH,
        next: Timestamp::EPOCH,
    };

    /// Returns the canonical empty period.
    #[inline]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Creates the period `[first, next)`.
    ///
    /// A zero-length pair collapses to [`Period::EMPTY`].
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidInterval`] if `first > next`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let p = Period::new(t(10), t(20)).unwrap();
    /// assert_eq!(p.start(), t(10));
    /// assert!(Period::new(t(7), t(7)).unwrap().is_empty());
    /// assert!(Period::new(t(20), t(10)).is_err());
    /// ```
    pub fn new(first: Timestamp, next: Timestamp) -> PeriodResult<Self> {
        match first.cmp(&next) {
            Ordering::Less => Ok(Self { first, next }),
            Ordering::Equal => Ok(Self::EMPTY),
            Ordering::Greater => Err(PeriodError::InvalidInterval { first, next }),
        }
    }

    #[inline]
    fn new_unchecked(first: Timestamp, next: Timestamp) -> Self {
        debug_assert!(first < next, "Invalid period: first must be less than next");
        Self { first, next }
    }

    /// Builds `[first, next)`, mapping inverted or zero-length pairs to empty.
    #[inline]
    fn normalized(first: Timestamp, next: Timestamp) -> Self {
        if first < next {
            Self { first, next }
        } else {
            Self::EMPTY
        }
    }

    /// Creates a period from two endpoints with explicit inclusivity.
    ///
    /// An exclusive lower bound is moved to its successor and an inclusive
    /// upper bound is moved to its successor, so the result is always stored
    /// half-open. If the shifted endpoints meet, the result is empty.
    ///
    /// # Errors
    ///
    /// - [`PeriodError::InvalidInterval`] if `t1 > t2`.
    /// - [`PeriodError::TimestampOverflow`] if a shift leaves the finite range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let p = Period::from_endpoints(t(5), false, t(10), true).unwrap();
    /// assert_eq!(p, Period::new(t(6), t(11)).unwrap());
    /// ```
    pub fn from_endpoints(
        t1: Timestamp,
        t1_inclusive: bool,
        t2: Timestamp,
        t2_inclusive: bool,
    ) -> PeriodResult<Self> {
        if t1 > t2 {
            return Err(PeriodError::InvalidInterval {
                first: t1,
                next: t2,
            });
        }

        let first = if t1_inclusive { t1 } else { t1.successor()? };
        let next = if t2_inclusive { t2.successor()? } else { t2 };
        Ok(Self::normalized(first, next))
    }

    /// Creates `[t1, t2)`.
    #[inline]
    pub fn closed_open(t1: Timestamp, t2: Timestamp) -> PeriodResult<Self> {
        Self::from_endpoints(t1, true, t2, false)
    }

    /// Creates `[t1, t2]`.
    #[inline]
    pub fn closed_closed(t1: Timestamp, t2: Timestamp) -> PeriodResult<Self> {
        Self::from_endpoints(t1, true, t2, true)
    }

    /// Creates `(t1, t2)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros(5);
    /// assert_eq!(Period::open_open(t, t).unwrap(), Period::EMPTY);
    /// ```
    #[inline]
    pub fn open_open(t1: Timestamp, t2: Timestamp) -> PeriodResult<Self> {
        Self::from_endpoints(t1, false, t2, false)
    }

    /// Creates `(t1, t2]`.
    #[inline]
    pub fn open_closed(t1: Timestamp, t2: Timestamp) -> PeriodResult<Self> {
        Self::from_endpoints(t1, false, t2, true)
    }

    /// Creates the single-instant period `[t, successor(t))`.
    ///
    /// Since infinities absorb the successor step, a non-finite `t` yields the
    /// empty period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::TimestampOverflow`] if `t` is the last finite instant.
    #[inline]
    pub fn point(t: Timestamp) -> PeriodResult<Self> {
        Ok(Self::normalized(t, t.successor()?))
    }

    /// Returns the stored lower endpoint (`0` for the empty period).
    #[inline]
    pub const fn start(&self) -> Timestamp {
        self.first
    }

    /// Returns the stored upper endpoint (`0` for the empty period).
    #[inline]
    pub const fn end(&self) -> Timestamp {
        self.next
    }

    /// Returns `true` if this is the canonical empty period.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first == Timestamp::EPOCH && self.next == Timestamp::EPOCH
    }

    #[inline]
    fn non_empty(&self) -> PeriodResult<&Self> {
        if self.is_empty() {
            Err(PeriodError::EmptyInterval)
        } else {
            Ok(self)
        }
    }

    #[inline]
    fn both_non_empty(&self, other: &Self) -> PeriodResult<()> {
        self.non_empty()?;
        other.non_empty()?;
        Ok(())
    }

    /// Returns the first instant included in the period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] for the empty period.
    #[inline]
    pub fn first(&self) -> PeriodResult<Timestamp> {
        Ok(self.non_empty()?.first)
    }

    /// Returns the first instant after the period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] for the empty period.
    #[inline]
    pub fn next(&self) -> PeriodResult<Timestamp> {
        Ok(self.non_empty()?.next)
    }

    /// Returns the last instant included in the period.
    ///
    /// # Errors
    ///
    /// [`PeriodError::EmptyInterval`] for the empty period, or
    /// [`PeriodError::TimestampOverflow`] if the step back overflows.
    #[inline]
    pub fn last(&self) -> PeriodResult<Timestamp> {
        self.next()?.predecessor()
    }

    /// Returns the last instant before the period.
    ///
    /// # Errors
    ///
    /// [`PeriodError::EmptyInterval`] for the empty period, or
    /// [`PeriodError::TimestampOverflow`] if the step back overflows.
    #[inline]
    pub fn prior(&self) -> PeriodResult<Timestamp> {
        self.first()?.predecessor()
    }

    /// Returns the duration `next - first`.
    ///
    /// The empty period has zero length.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::TimestampOverflow`] if either endpoint is
    /// infinite or the span does not fit in microseconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    /// # use chrono::TimeDelta;
    ///
    /// let p = Period::new(Timestamp::from_micros(0), Timestamp::from_micros(2_000_000)).unwrap();
    /// assert_eq!(p.length().unwrap(), TimeDelta::seconds(2));
    /// ```
    pub fn length(&self) -> PeriodResult<TimeDelta> {
        if self.is_empty() {
            return Ok(TimeDelta::zero());
        }
        for endpoint in [self.first, self.next] {
            if !endpoint.is_finite() {
                return Err(PeriodError::TimestampOverflow(endpoint));
            }
        }
        self.next
            .as_micros()
            .checked_sub(self.first.as_micros())
            .map(TimeDelta::microseconds)
            .ok_or(PeriodError::TimestampOverflow(self.next))
    }

    /// Returns how far `t` lies past the start of the period.
    ///
    /// # Errors
    ///
    /// - [`PeriodError::TimestampNotContained`] if `t` is not in the period.
    /// - [`PeriodError::TimestampOverflow`] if the distance does not fit.
    pub fn offset(&self, t: Timestamp) -> PeriodResult<TimeDelta> {
        self.offset_micros(t).map(TimeDelta::microseconds)
    }

    /// Like [`Period::offset`], truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// Same as [`Period::offset`].
    pub fn offset_seconds(&self, t: Timestamp) -> PeriodResult<i64> {
        Ok(self.offset_micros(t)? / MICROS_PER_SECOND)
    }

    fn offset_micros(&self, t: Timestamp) -> PeriodResult<i64> {
        if !self.contains_timestamp(t) {
            return Err(PeriodError::TimestampNotContained {
                timestamp: t,
                period: *self,
            });
        }
        t.as_micros()
            .checked_sub(self.first.as_micros())
            .ok_or(PeriodError::TimestampOverflow(self.first))
    }

    /// Returns `true` if the whole period lies before `t` (`next < t`).
    ///
    /// The empty period is neither before nor after any timestamp, so this
    /// returns `false` for it instead of comparing its stored `next` of `0`
    /// against `t`.
    #[inline]
    pub fn less_than_timestamp(&self, t: Timestamp) -> bool {
        !self.is_empty() && self.next < t
    }

    /// Returns `true` if the whole period lies after `t` (`first > t`).
    ///
    /// The empty period is neither before nor after any timestamp, so this
    /// returns `false` for it instead of comparing its stored `first` of `0`
    /// against `t`.
    #[inline]
    pub fn greater_than_timestamp(&self, t: Timestamp) -> bool {
        !self.is_empty() && self.first > t
    }

    /// Returns `true` if `self` ends no later than `other` starts.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] if either operand is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(10)).unwrap();
    /// let b = Period::new(t(10), t(20)).unwrap();
    /// assert!(a.before(b).unwrap());
    /// assert!(a.before(Period::EMPTY).is_err());
    /// ```
    #[inline]
    pub fn before(&self, other: Self) -> PeriodResult<bool> {
        self.both_non_empty(&other)?;
        Ok(self.next <= other.first)
    }

    /// Returns `true` if `self` starts no earlier than `other` ends.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] if either operand is empty.
    #[inline]
    pub fn after(&self, other: Self) -> PeriodResult<bool> {
        other.before(*self)
    }

    /// Returns `true` if the periods share at least one instant.
    ///
    /// Empty periods overlap nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(10)).unwrap();
    /// assert!(a.overlaps(Period::new(t(5), t(15)).unwrap()));
    /// assert!(!a.overlaps(Period::new(t(10), t(20)).unwrap()));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.first < other.next && other.first < self.next
    }

    /// Returns `true` if `self` does not extend to the right of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] if either operand is empty.
    #[inline]
    pub fn overleft(&self, other: Self) -> PeriodResult<bool> {
        self.both_non_empty(&other)?;
        Ok(self.next <= other.next)
    }

    /// Returns `true` if `self` does not extend to the left of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] if either operand is empty.
    #[inline]
    pub fn overright(&self, other: Self) -> PeriodResult<bool> {
        self.both_non_empty(&other)?;
        Ok(self.first >= other.first)
    }

    /// Returns `true` if every instant of `other` lies in `self`.
    ///
    /// The empty period is contained by every period, itself included.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(10)).unwrap();
    /// assert!(a.contains(Period::new(t(2), t(8)).unwrap()));
    /// assert!(a.contains(Period::EMPTY));
    /// assert!(Period::EMPTY.contains(Period::EMPTY));
    /// ```
    #[inline]
    pub fn contains(&self, other: Self) -> bool {
        if other.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }
        self.first <= other.first && other.next <= self.next
    }

    /// Returns `true` if `t` lies in `[first, next)`.
    #[inline]
    pub fn contains_timestamp(&self, t: Timestamp) -> bool {
        !self.is_empty() && self.first <= t && t < self.next
    }

    #[inline]
    fn touches(&self, other: &Self) -> bool {
        other.first == self.next || self.first == other.next
    }

    /// Returns `true` if the periods meet end-to-start without overlapping.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::EmptyInterval`] if either operand is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(10)).unwrap();
    /// assert!(a.adjacent(Period::new(t(10), t(20)).unwrap()).unwrap());
    /// ```
    #[inline]
    pub fn adjacent(&self, other: Self) -> PeriodResult<bool> {
        self.both_non_empty(&other)?;
        Ok(self.touches(&other))
    }

    /// Returns the smallest period covering both operands.
    ///
    /// This is the greedy union used for bounding intervals: any gap between
    /// the operands is absorbed. An empty operand is the identity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(5)).unwrap();
    /// let b = Period::new(t(10), t(15)).unwrap();
    /// assert_eq!(a.span(b), Period::new(t(0), t(15)).unwrap());
    /// assert_eq!(a.span(Period::EMPTY), a);
    /// ```
    #[inline]
    pub fn span(&self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::new_unchecked(min(self.first, other.first), max(self.next, other.next))
    }

    /// Returns the set union of two periods that overlap or are adjacent.
    ///
    /// An empty operand is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::DisjointUnion`] if a gap separates the operands.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(10)).unwrap();
    /// let b = Period::new(t(10), t(20)).unwrap();
    /// assert_eq!(a.union(b).unwrap(), Period::new(t(0), t(20)).unwrap());
    /// assert!(a.union(Period::new(t(12), t(20)).unwrap()).is_err());
    /// ```
    pub fn union(&self, other: Self) -> PeriodResult<Self> {
        if self.is_empty() {
            return Ok(other);
        }
        if other.is_empty() {
            return Ok(*self);
        }
        if self.overlaps(other) || self.touches(&other) {
            Ok(self.span(other))
        } else {
            Err(PeriodError::DisjointUnion {
                left: *self,
                right: other,
            })
        }
    }

    /// Returns the instants common to both periods.
    ///
    /// Disjoint or adjacent operands produce the empty period.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let a = Period::new(t(0), t(10)).unwrap();
    /// let b = Period::new(t(5), t(15)).unwrap();
    /// assert_eq!(a.intersect(b), Period::new(t(5), t(10)).unwrap());
    /// ```
    #[inline]
    pub fn intersect(&self, other: Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::EMPTY;
        }
        Self::normalized(max(self.first, other.first), min(self.next, other.next))
    }

    /// Returns `self` with the instants of `other` removed.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::NonContiguousResult`] if `other` cuts a hole
    /// strictly inside `self`, since the remainder would be two periods.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let base = Period::new(t(0), t(100)).unwrap();
    /// let tail = Period::new(t(50), t(200)).unwrap();
    /// assert_eq!(base.minus(tail).unwrap(), Period::new(t(0), t(50)).unwrap());
    ///
    /// let hole = Period::new(t(20), t(30)).unwrap();
    /// assert!(base.minus(hole).is_err());
    /// ```
    pub fn minus(&self, other: Self) -> PeriodResult<Self> {
        if self.is_empty() {
            return Ok(Self::EMPTY);
        }
        if other.is_empty() {
            return Ok(*self);
        }

        let common = self.intersect(other);
        if common.is_empty() {
            Ok(*self)
        } else if common.first == self.first {
            Ok(Self::normalized(common.next, self.next))
        } else if common.next == self.next {
            Ok(Self::new_unchecked(self.first, common.first))
        } else {
            Err(PeriodError::NonContiguousResult {
                minuend: *self,
                subtrahend: other,
            })
        }
    }

    /// Calculates the set difference `self - other` as up to two pieces.
    ///
    /// Unlike [`Period::minus`], a hole is not an error: both remainders are
    /// returned, left piece first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::math::period::Period;
    /// # use period_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_micros;
    /// let base = Period::new(t(0), t(10)).unwrap();
    /// let pieces = base.difference(Period::new(t(4), t(6)).unwrap());
    /// assert_eq!(pieces.as_slice(), &[
    ///     Period::new(t(0), t(4)).unwrap(),
    ///     Period::new(t(6), t(10)).unwrap(),
    /// ]);
    /// ```
    pub fn difference(&self, other: Self) -> SmallVec<[Self; 2]> {
        if self.is_empty() {
            return SmallVec::new();
        }
        if !self.overlaps(other) {
            return smallvec![*self];
        }

        let mut pieces = SmallVec::new();
        if self.first < other.first {
            pieces.push(Self::new_unchecked(self.first, other.first));
        }
        if other.next < self.next {
            pieces.push(Self::new_unchecked(other.next, self.next));
        }
        pieces
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .first
                .cmp(&other.first)
                .then_with(|| self.next.cmp(&other.next)),
        }
    }
}

impl PartialOrd for Period {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BitAnd for Period {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect(rhs)
    }
}

impl Default for Period {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "Period(EMPTY)");
        }
        f.debug_struct("Period")
            .field("first", &self.first)
            .field("next", &self.next)
            .finish()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "-EMPTY-")
        } else {
            write!(f, "[{}, {})", self.first, self.next)
        }
    }
}

impl RangeBounds<Timestamp> for Period {
    fn start_bound(&self) -> Bound<&Timestamp> {
        Bound::Included(&self.first)
    }

    fn end_bound(&self) -> Bound<&Timestamp> {
        Bound::Excluded(&self.next)
    }
}

impl TryFrom<Range<Timestamp>> for Period {
    type Error = PeriodError;

    #[inline]
    fn try_from(range: Range<Timestamp>) -> Result<Self, Self::Error> {
        Self::new(range.start, range.end)
    }
}
