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

//! # Timestamp Domain
//!
//! A monotonic, totally ordered timestamp with explicit infinity sentinels.
//!
//! Instead of wrapping the value in an enum, `Timestamp` reserves the two
//! extreme `i64` values as sentinels so that it stays a single machine word:
//!
//! - `i64::MIN` encodes `-infinity`.
//! - `i64::MAX` encodes `+infinity`.
//! - Every other value is a count of microseconds since the Unix epoch.
//!
//! Because the sentinels sit at the ends of the integer range, the derived
//! `Ord` already places `-infinity` below and `+infinity` above every finite
//! instant. Stepping to the adjacent representable value is checked: the
//! sentinels absorb steps, and a finite step that would land on a sentinel
//! is reported as an overflow.

use crate::error::{PeriodError, PeriodResult};
use chrono::{DateTime, SecondsFormat, Utc};
use num_traits::Bounded;

/// A point on the microsecond timeline, with `±infinity` sentinels.
///
/// # Examples
///
/// ```rust
/// # use period_core::time::Timestamp;
///
/// let t = Timestamp::from_micros(41);
/// assert_eq!(t.successor().unwrap(), Timestamp::from_micros(42));
/// assert!(Timestamp::NEG_INFINITY < t && t < Timestamp::INFINITY);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The `-infinity` sentinel, ordered before every other timestamp.
    pub const NEG_INFINITY: Self = Timestamp(i64::MIN);

    /// The `+infinity` sentinel, ordered after every other timestamp.
    pub const INFINITY: Self = Timestamp(i64::MAX);

    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const EPOCH: Self = Timestamp(0);

    /// Creates a timestamp from raw microseconds since the epoch.
    ///
    /// Passing `i64::MIN` or `i64::MAX` yields the corresponding sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::time::Timestamp;
    ///
    /// assert_eq!(Timestamp::from_micros(i64::MAX), Timestamp::INFINITY);
    /// ```
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    /// Returns the raw microsecond value, including sentinel encodings.
    #[inline]
    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// Returns `true` unless this is one of the two infinity sentinels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::time::Timestamp;
    ///
    /// assert!(Timestamp::EPOCH.is_finite());
    /// assert!(!Timestamp::INFINITY.is_finite());
    /// assert!(!Timestamp::NEG_INFINITY.is_finite());
    /// ```
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 != i64::MIN && self.0 != i64::MAX
    }

    /// Returns the next representable timestamp.
    ///
    /// Infinities are absorbing and come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::TimestampOverflow`] if the step would reach the
    /// `+infinity` sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::time::Timestamp;
    ///
    /// assert_eq!(Timestamp::INFINITY.successor().unwrap(), Timestamp::INFINITY);
    /// assert!(Timestamp::from_micros(i64::MAX - 1).successor().is_err());
    /// ```
    pub fn successor(self) -> PeriodResult<Self> {
        if !self.is_finite() {
            return Ok(self);
        }
        match self.0.checked_add(1).map(Timestamp) {
            Some(next) if next.is_finite() => Ok(next),
            _ => Err(PeriodError::TimestampOverflow(self)),
        }
    }

    /// Returns the previous representable timestamp.
    ///
    /// Infinities are absorbing and come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::TimestampOverflow`] if the step would reach the
    /// `-infinity` sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::time::Timestamp;
    ///
    /// assert_eq!(Timestamp::EPOCH.predecessor().unwrap(), Timestamp::from_micros(-1));
    /// assert!(Timestamp::from_micros(i64::MIN + 1).predecessor().is_err());
    /// ```
    pub fn predecessor(self) -> PeriodResult<Self> {
        if !self.is_finite() {
            return Ok(self);
        }
        match self.0.checked_sub(1).map(Timestamp) {
            Some(prior) if prior.is_finite() => Ok(prior),
            _ => Err(PeriodError::TimestampOverflow(self)),
        }
    }

    /// Converts a UTC date-time to a timestamp, truncating to microseconds.
    #[inline]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Timestamp(datetime.timestamp_micros())
    }

    /// Converts back to a UTC date-time.
    ///
    /// Returns `None` for the sentinels and for values outside chrono's range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use period_core::time::Timestamp;
    ///
    /// let dt = Timestamp::from_micros(1_500_000).to_datetime().unwrap();
    /// assert_eq!(dt.timestamp_millis(), 1_500);
    /// assert!(Timestamp::INFINITY.to_datetime().is_none());
    /// ```
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.is_finite() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_micros(self.0)
    }
}

impl Bounded for Timestamp {
    #[inline]
    fn min_value() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn max_value() -> Self {
        Self::INFINITY
    }
}

impl From<DateTime<Utc>> for Timestamp {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NEG_INFINITY => write!(f, "Timestamp(-infinity)"),
            Self::INFINITY => write!(f, "Timestamp(infinity)"),
            Timestamp(micros) => write!(f, "Timestamp({})", micros),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NEG_INFINITY => write!(f, "-infinity"),
            Self::INFINITY => write!(f, "infinity"),
            _ => match self.to_datetime() {
                Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Micros, true)),
                None => write!(f, "{}us", self.0),
            },
        }
    }
}
