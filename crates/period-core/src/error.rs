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

//! Error type shared by the timestamp domain and the period algebra.
//!
//! Every failure is local and synchronous: an operation either produces a
//! complete value or one of the variants below, never a partial result.

use crate::{math::period::Period, time::Timestamp};
use thiserror::Error;

/// Result alias for period and timestamp operations.
pub type PeriodResult<T> = Result<T, PeriodError>;

/// The error type for period construction, relations and set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PeriodError {
    /// A relation that is only defined on non-empty periods received an empty one.
    #[error("period is empty")]
    EmptyInterval,

    /// The lower endpoint lies after the upper endpoint.
    #[error("invalid period: first ({first}) > next ({next})")]
    InvalidInterval {
        /// The requested lower endpoint.
        first: Timestamp,
        /// The requested upper endpoint.
        next: Timestamp,
    },

    /// A non-greedy union of periods that neither overlap nor touch.
    #[error("can only union overlapping, empty, or adjacent periods: {left} and {right}")]
    DisjointUnion {
        /// The left operand.
        left: Period,
        /// The right operand.
        right: Period,
    },

    /// Subtracting a strictly interior period would leave two pieces.
    #[error("cannot subtract {subtrahend} from {minuend}: result is not contiguous")]
    NonContiguousResult {
        /// The period being subtracted from.
        minuend: Period,
        /// The period being removed.
        subtrahend: Period,
    },

    /// Stepping or measuring from this timestamp left the representable range.
    #[error("timestamp overflow at {0}")]
    TimestampOverflow(Timestamp),

    /// An offset was requested for a timestamp outside the period.
    #[error("timestamp {timestamp} is not contained in {period}")]
    TimestampNotContained {
        /// The probed timestamp.
        timestamp: Timestamp,
        /// The period it was expected to fall in.
        period: Period,
    },
}
