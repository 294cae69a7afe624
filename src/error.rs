// Copyright 2026 pipesolve contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module groups every error kind that can be surfaced by the crate:
//! invariant violations (programmer errors, fail fast, never recovered), and
//! the handful of input-validation failures that sit at the boundary of the
//! library (`n = 1`, an oracle of the wrong shape, a board with empty
//! cells). "Unsatisfiable node" is deliberately absent from this enum: it is
//! an expected search event recovered locally by the backtracking loop, not
//! something callers ever observe.

/// The single error type returned by every fallible entry point of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Attempted to assign a value that is not a member of the variable's
    /// full domain.
    #[error("value {value:?} is not in the domain of variable at cell {cell}")]
    NotInDomain {
        /// Linear cell index of the offending variable.
        cell: usize,
        /// Debug rendering of the rejected value.
        value: String,
    },
    /// Attempted to read the assignment of a variable that has none.
    #[error("variable at cell {cell} has no assignment")]
    UnassignedRead {
        /// Linear cell index of the offending variable.
        cell: usize,
    },
    /// Attempted to run a constraint's validator while some variable in its
    /// scope is unassigned.
    #[error("constraint {name} was validated with an incompletely assigned scope")]
    UnassignedScope {
        /// Name of the constraint.
        name: &'static str,
    },
    /// A move-picker call was given a board with at least one empty cell.
    #[error("board has an unassigned cell at index {cell}")]
    InvalidBoard {
        /// Linear cell index of the empty cell.
        cell: usize,
    },
    /// The scoring oracle returned a vector whose length does not match the
    /// input it was given.
    #[error("oracle returned a score vector of length {got}, expected {expected}")]
    OracleShapeMismatch {
        /// Length actually produced by the oracle.
        got: usize,
        /// Length the core required (4 * n^2).
        expected: usize,
    },
    /// The scoring oracle could not be reached or failed during inference.
    #[error("scoring oracle is unavailable: {0}")]
    OracleUnavailable(String),
    /// `n = 1` (and any `n = 0`) is outside the scope of this solver: a
    /// single cell has no neighbors to connect to, so the puzzle as defined
    /// is degenerate.
    #[error("grid size {0} is not supported; n must be >= 2")]
    UnsupportedSize(usize),
    /// The search exhausted the stack without finding a solution. The
    /// solver itself never panics or retries on this; it is the caller's
    /// job to translate it into a domain-specific message.
    #[error("no solution exists for grid size {0}")]
    NoSolution(usize),
    /// A canonical solution string could not be decoded (wrong length, or a
    /// character other than '0'/'1').
    #[error("malformed solution string: {0}")]
    MalformedEncoding(String),
    /// (De)serialization of the solved-puzzle JSON asset failed.
    #[error("json (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias used throughout the crate's public API.
pub type Result<T> = std::result::Result<T, Error>;
