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

//! # Consistency Oracle
//!
//! Given a stored key, a query and an operator, decides whether the key can
//! match (at a leaf) or whether the subtree summarized by the key may hold a
//! match (at an internal node).
//!
//! Leaf answers are exact. Internal answers are conservative: whenever some
//! leaf below a bounding key satisfies the leaf test, the internal test on
//! that bounding key is `true`. False positives only cost a wasted descent.
//!
//! | Strategy                 | Leaf                 | Internal               |
//! |--------------------------|----------------------|------------------------|
//! | 1 strictly-before        | `before(key, q)`     | `!overright(key, q)`   |
//! | 2 overleft               | `overleft(key, q)`   | `!before(q, key)`      |
//! | 3 overlaps               | `overlaps(key, q)`   | `overlaps(key, q)`     |
//! | 4 overright              | `overright(key, q)`  | `!before(key, q)`      |
//! | 5 strictly-after         | `before(q, key)`     | `!overleft(key, q)`    |
//! | 6 same                   | `key == q`           | `contains(key, q)`     |
//! | 7, 17, 27 contains       | `contains(key, q)`   | `contains(key, q)`     |
//! | 8, 18, 28 contained-by   | `contains(q, key)`   | `overlaps(key, q)`     |
//!
//! Contained-by also descends into empty bounds, which hold only empty keys.
//!
//! A timestamp query `t` uses the single-instant period `[t, successor(t))`.
//! The infinity sentinels have no such period, so they are compared with the
//! key's endpoints directly: a key contains `±infinity` exactly when
//! [`Period::contains_timestamp`] holds.

use crate::error::{IndexError, IndexResult};
use period_core::{Period, PeriodResult, Timestamp};

/// Operator selector understood by the oracle.
///
/// The discriminants are the host's strategy numbers. The aliases 17 and 18
/// are accepted by [`Strategy::try_from`] and folded onto
/// [`Strategy::Contains`] and [`Strategy::ContainedBy`].
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The key ends no later than the query starts.
    StrictlyBefore = 1,
    /// The key does not extend to the right of the query.
    OverLeft = 2,
    /// The key and the query share an instant.
    Overlaps = 3,
    /// The key does not extend to the left of the query.
    OverRight = 4,
    /// The key starts no earlier than the query ends.
    StrictlyAfter = 5,
    /// The key equals the query.
    Same = 6,
    /// The key contains the query period.
    Contains = 7,
    /// The key is contained by the query period.
    ContainedBy = 8,
    /// The key contains the query timestamp.
    ContainsPoint = 27,
    /// The key is contained by the query's single-instant period.
    ContainedByPoint = 28,
}

impl Strategy {
    /// Every strategy, in strategy-number order.
    pub const ALL: [Strategy; 10] = [
        Strategy::StrictlyBefore,
        Strategy::OverLeft,
        Strategy::Overlaps,
        Strategy::OverRight,
        Strategy::StrictlyAfter,
        Strategy::Same,
        Strategy::Contains,
        Strategy::ContainedBy,
        Strategy::ContainsPoint,
        Strategy::ContainedByPoint,
    ];

    /// Returns the canonical strategy number.
    #[inline]
    pub const fn number(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Strategy {
    type Error = IndexError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Strategy::StrictlyBefore),
            2 => Ok(Strategy::OverLeft),
            3 => Ok(Strategy::Overlaps),
            4 => Ok(Strategy::OverRight),
            5 => Ok(Strategy::StrictlyAfter),
            6 => Ok(Strategy::Same),
            7 | 17 => Ok(Strategy::Contains),
            8 | 18 => Ok(Strategy::ContainedBy),
            27 => Ok(Strategy::ContainsPoint),
            28 => Ok(Strategy::ContainedByPoint),
            other => Err(IndexError::UnsupportedOperator(other)),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::StrictlyBefore => "strictly-before",
            Strategy::OverLeft => "overleft",
            Strategy::Overlaps => "overlaps",
            Strategy::OverRight => "overright",
            Strategy::StrictlyAfter => "strictly-after",
            Strategy::Same => "same",
            Strategy::Contains => "contains",
            Strategy::ContainedBy => "contained-by",
            Strategy::ContainsPoint => "contains-point",
            Strategy::ContainedByPoint => "contained-by-point",
        };
        write!(f, "{}", name)
    }
}

/// The right-hand operand of an indexed operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// A period operand.
    Period(Period),
    /// A timestamp operand.
    ///
    /// A finite `t` is treated as its single-instant period
    /// `[t, successor(t))`. The infinity sentinels have no such period and
    /// are matched against the key's endpoints instead.
    Timestamp(Timestamp),
}

impl Query {
    fn operand(self) -> PeriodResult<Operand> {
        match self {
            Query::Period(period) => Ok(Operand::Span(period)),
            Query::Timestamp(t) if !t.is_finite() => Ok(Operand::Unbounded(t)),
            Query::Timestamp(t) => Period::point(t).map(Operand::Span),
        }
    }
}

impl From<Period> for Query {
    #[inline]
    fn from(period: Period) -> Self {
        Query::Period(period)
    }
}

impl From<Timestamp> for Query {
    #[inline]
    fn from(t: Timestamp) -> Self {
        Query::Timestamp(t)
    }
}

/// A query after timestamp reduction.
#[derive(Debug, Clone, Copy)]
enum Operand {
    Span(Period),
    /// `-infinity` or `+infinity`.
    Unbounded(Timestamp),
}

/// Decides whether `key` is consistent with `query` under `strategy`.
///
/// With `is_leaf` the answer is exact; otherwise `key` is treated as the
/// bounding period of a subtree and the answer is conservative.
///
/// # Errors
///
/// Propagates the relation errors of the underlying predicates, e.g.
/// [`period_core::PeriodError::EmptyInterval`] when an ordering operator
/// meets an empty operand, or
/// [`period_core::PeriodError::TimestampOverflow`] for a timestamp query at
/// the last finite instant.
///
/// # Examples
///
/// ```rust
/// # use period_core::{Period, Timestamp};
/// # use period_index::consistent::{Strategy, consistent};
///
/// let t = Timestamp::from_micros;
/// let key = Period::new(t(0), t(50)).unwrap();
/// let query = Period::new(t(60), t(70)).unwrap();
///
/// assert!(!consistent(key, query, Strategy::Overlaps, true).unwrap());
/// assert!(consistent(key, query, Strategy::StrictlyBefore, true).unwrap());
/// assert!(consistent(key, t(10), Strategy::ContainsPoint, true).unwrap());
/// assert!(!consistent(key, Timestamp::INFINITY, Strategy::ContainsPoint, true).unwrap());
/// ```
pub fn consistent(
    key: Period,
    query: impl Into<Query>,
    strategy: Strategy,
    is_leaf: bool,
) -> IndexResult<bool> {
    let answer = match (query.into().operand()?, is_leaf) {
        (Operand::Span(query), true) => leaf_consistent(key, query, strategy)?,
        (Operand::Span(query), false) => internal_consistent(key, query, strategy)?,
        (Operand::Unbounded(t), true) => leaf_unbounded(key, t, strategy)?,
        (Operand::Unbounded(t), false) => internal_unbounded(key, t, strategy)?,
    };
    Ok(answer)
}

/// Like [`consistent`], but takes the raw strategy number.
///
/// # Errors
///
/// Returns [`IndexError::UnsupportedOperator`] for unknown numbers, plus
/// everything [`consistent`] may return.
pub fn consistent_code(
    key: Period,
    query: impl Into<Query>,
    code: u16,
    is_leaf: bool,
) -> IndexResult<bool> {
    consistent(key, query, Strategy::try_from(code)?, is_leaf)
}

/// Exact test of a stored key against a query period.
///
/// # Errors
///
/// Ordering strategies (1, 2, 4, 5) fail on empty operands.
pub fn leaf_consistent(key: Period, query: Period, strategy: Strategy) -> PeriodResult<bool> {
    match strategy {
        Strategy::StrictlyBefore => key.before(query),
        Strategy::OverLeft => key.overleft(query),
        Strategy::Overlaps => Ok(key.overlaps(query)),
        Strategy::OverRight => key.overright(query),
        Strategy::StrictlyAfter => query.before(key),
        Strategy::Same => Ok(key == query),
        Strategy::Contains | Strategy::ContainsPoint => Ok(key.contains(query)),
        Strategy::ContainedBy | Strategy::ContainedByPoint => Ok(query.contains(key)),
    }
}

/// Conservative test of a subtree's bounding key against a query period.
///
/// # Errors
///
/// Ordering strategies (1, 2, 4, 5) fail on empty operands.
pub fn internal_consistent(key: Period, query: Period, strategy: Strategy) -> PeriodResult<bool> {
    match strategy {
        Strategy::StrictlyBefore => Ok(!key.overright(query)?),
        Strategy::OverLeft => Ok(!query.before(key)?),
        Strategy::Overlaps => Ok(key.overlaps(query)),
        Strategy::OverRight => Ok(!key.before(query)?),
        Strategy::StrictlyAfter => Ok(!key.overleft(query)?),
        Strategy::Same | Strategy::Contains | Strategy::ContainsPoint => Ok(key.contains(query)),
        // An empty bound covers only empty keys. Empty keys below a
        // non-empty bound that misses the query are still pruned.
        Strategy::ContainedBy | Strategy::ContainedByPoint => {
            Ok(key.is_empty() || key.overlaps(query))
        }
    }
}

/// Exact test of a stored key against an infinity sentinel.
///
/// The sentinel is an instant without extent: a key overlaps or contains it
/// exactly when [`Period::contains_timestamp`] says so, and only the empty
/// key is contained by it.
fn leaf_unbounded(key: Period, t: Timestamp, strategy: Strategy) -> PeriodResult<bool> {
    match strategy {
        Strategy::StrictlyBefore | Strategy::OverLeft => Ok(key.next()? <= t),
        Strategy::OverRight => Ok(key.first()? >= t),
        Strategy::StrictlyAfter => Ok(key.first()? > t),
        Strategy::Overlaps | Strategy::Contains | Strategy::ContainsPoint => {
            Ok(key.contains_timestamp(t))
        }
        Strategy::Same => Ok(false),
        Strategy::ContainedBy | Strategy::ContainedByPoint => Ok(key.is_empty()),
    }
}

fn internal_unbounded(key: Period, t: Timestamp, strategy: Strategy) -> PeriodResult<bool> {
    match strategy {
        Strategy::StrictlyBefore | Strategy::OverLeft => Ok(key.first()? < t),
        Strategy::OverRight | Strategy::StrictlyAfter => Ok(key.next()? > t),
        Strategy::Overlaps | Strategy::Contains | Strategy::ContainsPoint => {
            Ok(key.contains_timestamp(t))
        }
        Strategy::Same => Ok(false),
        Strategy::ContainedBy | Strategy::ContainedByPoint => Ok(key.is_empty()),
    }
}
