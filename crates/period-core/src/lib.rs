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

//! # Period Core
//!
//! Half-open time periods over a microsecond timestamp domain. This crate
//! holds the value types and the interval algebra that the index-support
//! crate builds on, and nothing else: no I/O, no persistence, no shared state.
//!
//! ## Modules
//!
//! - `time`: `Timestamp`, an `i64` microsecond instant with `±infinity`
//!   sentinels, checked `successor`/`predecessor` steps and chrono interop.
//! - `math`: `Period`, a `[first, next)` value with a canonical empty form,
//!   the binary relations (before/after, overlaps, overleft/overright,
//!   contains, adjacent), set operations (union, span, intersection,
//!   difference) and the total order used for B-tree keys.
//! - `error`: `PeriodError`, the single failure type of the algebra.
//!
//! ## Example
//!
//! ```rust
//! use period_core::{Period, Timestamp};
//!
//! let t = Timestamp::from_micros;
//! let morning = Period::new(t(0), t(10)).unwrap();
//! let noon = Period::new(t(10), t(20)).unwrap();
//!
//! assert!(morning.adjacent(noon).unwrap());
//! assert_eq!(morning.union(noon).unwrap(), Period::new(t(0), t(20)).unwrap());
//! ```

pub mod error;
pub mod math;
pub mod time;

pub use error::{PeriodError, PeriodResult};
pub use math::period::Period;
pub use time::Timestamp;
