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

//! Tunables for a single solver run.

use derive_builder::Builder;

/// Whether the search explores variables/domains in a fixed order or shuffles
/// them with a seeded RNG. Deterministic mode is required to always yield the
/// same first solution for a given `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Enumeration order only; ties broken by variable/domain index.
    Deterministic,
    /// Newly captured active domains are shuffled with the given seed before
    /// the search descends into them.
    Randomized {
        /// Seed for the RNG driving every shuffle decision in this run.
        seed: u64,
    },
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::Deterministic
    }
}

/// Configuration for one call to [`crate::search::solve`] or
/// [`crate::search::solve_cancellable`].
///
/// Built with [`SolveConfigBuilder`]: named setters, sane defaults, a single
/// `build()` at the end.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct SolveConfig {
    /// Stop the search after this many solutions have been recorded. `None`
    /// means "exhaust the whole search space".
    pub solution_cap: Option<usize>,
    /// Deterministic or randomized exploration, see [`SearchMode`].
    pub mode: SearchMode,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            solution_cap: Some(1),
            mode: SearchMode::Deterministic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_caps_at_one_solution_deterministically() {
        let cfg = SolveConfig::default();
        assert_eq!(cfg.solution_cap, Some(1));
        assert_eq!(cfg.mode, SearchMode::Deterministic);
    }

    #[test]
    fn builder_overrides_defaults() {
        let cfg = SolveConfigBuilder::default()
            .solution_cap(None)
            .mode(SearchMode::Randomized { seed: 7 })
            .build()
            .unwrap();
        assert_eq!(cfg.solution_cap, None);
        assert_eq!(cfg.mode, SearchMode::Randomized { seed: 7 });
    }
}
