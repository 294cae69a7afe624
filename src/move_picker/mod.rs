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

//! The scoring-oracle-driven move-picker: an alternative to
//! exhaustive backtracking search for callers (e.g. an interactive solver
//! assistant) that want one good next move at a time instead of a full
//! solution set.

pub mod memo;
pub mod oracle;
pub mod picker;

pub use memo::TriedMoveMemo;
pub use oracle::{ScoringOracle, StubOracle, TfScoringOracle};
pub use picker::{encode_board, fingerprint, is_solved, pick_move};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::config::SolveConfig;
    use crate::csp::Csp;
    use crate::pipe::Pipe;
    use crate::search;

    /// Scores every `(cell, direction)` pair against a known solved board:
    /// a cell that doesn't yet match `truth` gets `truth`'s own 1.0/0.0
    /// opening pattern (so, per cell, the one domain pipe identical to
    /// `truth` strictly outscores every other candidate there, since any
    /// other candidate must differ from `truth` in at least one on-grid
    /// direction); a cell that already matches `truth` gets an all-zero
    /// score, so none of its remaining (non-current) candidates can ever
    /// outscore a not-yet-fixed cell's correct pipe. This keeps the picker
    /// from ever undoing a correct cell in order to try some globally
    /// higher-scoring but wrong alternative elsewhere, so repeated calls
    /// converge on `truth` in exactly one step per mismatched cell.
    fn ground_truth_oracle(truth: Vec<[bool; 4]>) -> impl Fn(&[f32]) -> Vec<f32> {
        move |encoded: &[f32]| {
            let mut scores = vec![0.0f32; encoded.len()];
            for (cell, want) in truth.iter().enumerate() {
                let current = [
                    encoded[cell * 4] > 0.5,
                    encoded[cell * 4 + 1] > 0.5,
                    encoded[cell * 4 + 2] > 0.5,
                    encoded[cell * 4 + 3] > 0.5,
                ];
                if current == *want {
                    continue;
                }
                for d in 0..4 {
                    scores[cell * 4 + d] = if want[d] { 1.0 } else { 0.0 };
                }
            }
            scores
        }
    }

    fn truth_pipes(n: usize) -> Vec<Pipe> {
        let solution = search::solve(n, &SolveConfig::default()).unwrap().remove(0);
        solution
            .as_bytes()
            .chunks(4)
            .map(|c| Pipe::decode(std::str::from_utf8(c).unwrap()).unwrap())
            .collect()
    }

    /// Builds a board scrambled away from `truth`: every cell gets the
    /// first domain pipe that isn't its truth pipe, or the truth pipe
    /// itself when the domain has no other option (a forced cell).
    fn scrambled(n: usize, truth: &[Pipe]) -> Csp {
        let mut csp = Csp::new(n).unwrap();
        for (i, v) in csp.variables.iter_mut().enumerate() {
            let alt = v
                .full_domain()
                .iter()
                .copied()
                .find(|p| *p != truth[i])
                .unwrap_or(truth[i]);
            v.assign(alt).unwrap();
        }
        csp
    }

    #[test]
    fn move_on_a_solved_board_breaks_the_solved_predicate() {
        let n = 2;
        let truth = truth_pipes(n);
        let mut csp = Csp::new(n).unwrap();
        for (i, v) in csp.variables.iter_mut().enumerate() {
            v.assign(truth[i]).unwrap();
        }
        assert!(is_solved(&csp).unwrap());

        let oracle = StubOracle::new(|encoded: &[f32]| encoded.to_vec());
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();
        let (var, pipe) = pick_move(&csp, &oracle, &mut memo, &token)
            .unwrap()
            .expect("a solved board still offers every other rotation as a candidate");

        // Every domain pipe differs from every other in at least one
        // on-grid direction (cell_domain already excludes any pipe that
        // would open off-grid), so swapping in any alternative always
        // breaks a no-half-connection with some neighbor.
        csp.variables[var.0].assign(pipe).unwrap();
        assert!(!is_solved(&csp).unwrap());
    }

    #[test]
    fn picking_moves_until_solved_terminates_on_a_perfect_inverse_oracle() {
        crate::test_support::init_tracing();
        let n = 4;
        let truth = truth_pipes(n);
        let truth_openings: Vec<[bool; 4]> = truth.iter().map(|p| p.openings()).collect();
        let mut csp = scrambled(n, &truth);
        let oracle = StubOracle::new(ground_truth_oracle(truth_openings));
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();

        let cap = 4 * n * n;
        let mut steps = 0;
        while !is_solved(&csp).unwrap() {
            assert!(steps < cap, "move-picker failed to converge within {cap} steps");
            let (var, pipe) = pick_move(&csp, &oracle, &mut memo, &token)
                .unwrap()
                .expect("an unsolved board always has a correcting move available");
            csp.variables[var.0].assign(pipe).unwrap();
            steps += 1;
        }
        assert!(is_solved(&csp).unwrap());
    }
}
