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

//! Error type of the index-support layer.

use period_core::PeriodError;
use thiserror::Error;

/// Result alias for index-support operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// The error type for consistency checks and node splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum IndexError {
    /// A relation or construction on the underlying periods failed.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The strategy number does not name a supported operator.
    #[error("unrecognized strategy number: {0}")]
    UnsupportedOperator(u16),

    /// A node must hold at least two entries to be split in two.
    #[error("cannot split {0} entries into two non-empty groups")]
    TooFewEntries(usize),
}
