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

//! # pipesolve
//!
//! A constraint-satisfaction solver for pipes-style connection puzzles: an
//! n x n grid of rotatable pipe pieces, solved under four interacting
//! constraints (no half-connections, no cycles, full connectivity, and
//! boundary-aware per-cell domains). The crate also carries the small
//! move-picker used by an interactive "suggest the next rotation" assistant.
//!
//! ## Quick example
//! ```
//! use pipesolve::generate;
//!
//! let solution = generate(2).unwrap();
//! assert_eq!(solution.len(), 4 * 4);
//! ```
//!
//! ## Layout
//! - [`grid`] / [`pipe`]: direction encoding, neighbor lookup, the 14-shape
//!   base domain.
//! - [`csp`]: the `Variable`/`Constraint`/`Csp` model every propagator and
//!   the search loop are written in terms of.
//! - [`constraints`]: the four concrete constraints.
//! - [`propagate`]: the AC-3 worklist engine.
//! - [`search`]: the iterative backtracking search, with variable ordering,
//!   solution capping, and deterministic/randomized modes.
//! - [`solution`]: the serde-backed solved-puzzle JSON asset.
//! - [`move_picker`]: the scoring-oracle-driven single-move suggester.
//! - [`config`] / [`error`] / [`cancel`]: the ambient configuration, error,
//!   and cooperative-cancellation types shared by the above.
//!
//! Each module's own documentation goes into the algorithm it implements;
//! this page only orients you to where things live.

pub mod cancel;
pub mod config;
pub mod constraints;
pub mod csp;
pub mod error;
pub mod grid;
pub mod move_picker;
pub mod pipe;
pub mod propagate;
pub mod search;
pub mod solution;

#[cfg(test)]
mod test_support;

pub use cancel::CancellationToken;
pub use config::{SearchMode, SolveConfig, SolveConfigBuilder};
pub use error::{Error, Result};
pub use grid::Direction;
pub use pipe::Pipe;
pub use solution::SolutionSet;

/// Solves an `n x n` puzzle and returns its first canonical solution string
/// in deterministic mode. Shorthand for
/// `generate_with_config(n, &SolveConfig::default())` followed by taking the
/// lone entry the default `solution_cap: Some(1)` guarantees.
pub fn generate(n: usize) -> Result<String> {
    let solutions = search::solve(n, &config::SolveConfig::default())?;
    solutions.into_iter().next().ok_or(Error::NoSolution(n))
}

/// Solves an `n x n` puzzle under a caller-supplied [`SolveConfig`], e.g. to
/// collect more than one solution or to use the randomized search mode.
pub fn generate_with_config(n: usize, config: &SolveConfig) -> Result<Vec<String>> {
    search::solve(n, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_returns_a_valid_length_for_n_equals_2() {
        let s = generate(2).unwrap();
        assert_eq!(s.len(), 16);
    }

    #[test]
    fn generate_rejects_n_equals_1() {
        assert!(matches!(generate(1), Err(Error::UnsupportedSize(1))));
    }

    #[test]
    fn generate_is_deterministic_across_repeated_calls() {
        let a = generate(3).unwrap();
        let b = generate(3).unwrap();
        assert_eq!(a, b);
    }
}
