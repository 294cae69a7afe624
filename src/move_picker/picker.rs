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

//! The move-picker: given a fully-populated board (the interactive
//! assistant only ever runs against a scrambled-but-complete puzzle), encode
//! it, ask the [`ScoringOracle`] how promising each `(cell, direction)` is,
//! and offer the highest-scoring untried `(cell, pipe)` move. Every cell's
//! candidates are every other pipe in its full domain - a rotation away
//! from its current pipe. A board with any unassigned cell is rejected
//! outright (see [`pick_move`]).

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::csp::{Csp, VarId};
use crate::error::Error;
use crate::grid::ALL_DIRECTIONS;
use crate::move_picker::memo::TriedMoveMemo;
use crate::move_picker::oracle::ScoringOracle;
use crate::pipe::Pipe;

/// Flattens the board into the `4 * n^2` input the oracle expects: one
/// float per direction per cell, in row-major cell order and canonical
/// direction order, `1.0` for an assigned opening, `0.0` for a closed or
/// not-yet-decided one.
pub fn encode_board(csp: &Csp) -> Vec<f32> {
    let mut out = Vec::with_capacity(4 * csp.variables.len());
    for v in &csp.variables {
        let openings = v.assignment().map(|p| p.openings()).unwrap_or([false; 4]);
        for o in openings {
            out.push(if o { 1.0 } else { 0.0 });
        }
    }
    out
}

/// A partial-board fingerprint safe to use as a memoization key: each cell's
/// encoding if assigned, or `"????"` if not.
pub fn fingerprint(csp: &Csp) -> String {
    let mut out = String::with_capacity(4 * csp.variables.len());
    for v in &csp.variables {
        match v.assignment() {
            Some(p) => out.push_str(&p.encode()),
            None => out.push_str("????"),
        }
    }
    out
}

/// Whether the board is a complete, constraint-satisfying solution.
pub fn is_solved(csp: &Csp) -> Result<bool, Error> {
    if !csp.is_fully_assigned() {
        return Ok(false);
    }
    csp.validate_all()
}

/// Picks the highest-scoring untried `(cell, pipe)` move for the current
/// board, or `Ok(None)` if every candidate has already been offered for this
/// exact board fingerprint.
///
/// The move-picker only ever operates on a fully-populated board (the
/// interactive assistant scrambles a solved board in place, it never leaves
/// cells empty); a board with any unassigned cell is a programmer error and
/// is rejected with [`Error::InvalidBoard`] rather than handled gracefully.
///
/// `cancellation` is checked at every suspension boundary:
/// before the oracle call, after it returns, and right before the move is
/// committed to the memo. A cancellation observed at any of those points
/// discards the pending move (`Ok(None)`) rather than applying it.
pub fn pick_move(
    csp: &Csp,
    oracle: &dyn ScoringOracle,
    memo: &mut TriedMoveMemo,
    cancellation: &CancellationToken,
) -> Result<Option<(VarId, Pipe)>, Error> {
    if let Some(v) = csp.variables.iter().find(|v| !v.is_assigned()) {
        return Err(Error::InvalidBoard { cell: v.location });
    }

    if cancellation.is_cancelled() {
        return Ok(None);
    }

    let n = csp.n;
    let encoded = encode_board(csp);
    let scores = oracle.score(&encoded)?;

    if cancellation.is_cancelled() {
        return Ok(None);
    }

    let expected = 4 * n * n;
    if scores.len() != expected {
        return Err(Error::OracleShapeMismatch {
            got: scores.len(),
            expected,
        });
    }

    let fp = fingerprint(csp);
    let mut best: Option<(VarId, usize, Pipe, f32)> = None;

    for v in &csp.variables {
        // Every cell is assigned (checked above): its candidates are every
        // other full-domain pipe, i.e. every rotation away from its current
        // pipe.
        let current = v.assignment_or_err(v.location)?;
        let candidates: Vec<(usize, Pipe)> = v
            .full_domain()
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, p)| *p != current)
            .collect();

        for (idx, pipe) in candidates {
            if memo.was_tried(&fp, v.location, idx) {
                continue;
            }
            let score: f32 = ALL_DIRECTIONS
                .iter()
                .filter(|d| pipe.opens(**d))
                .map(|d| scores[v.location * 4 + d.index()])
                .sum();

            let better = match &best {
                None => true,
                Some((_, _, _, best_score)) => score > *best_score,
            };
            if better {
                best = Some((VarId(v.location), idx, pipe, score));
            }
        }
    }

    if cancellation.is_cancelled() {
        return Ok(None);
    }

    match best {
        Some((var, idx, pipe, score)) => {
            debug!(cell = var.0, score, "move-picker selected candidate");
            memo.record(&fp, var.0, idx);
            Ok(Some((var, pipe)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_picker::oracle::StubOracle;

    /// A fully-populated board (every cell assigned its first domain pipe,
    /// not necessarily a solution) - the only kind of board `pick_move`
    /// accepts.
    fn fully_assigned(n: usize) -> Csp {
        let mut csp = Csp::new(n).unwrap();
        for v in csp.variables.iter_mut() {
            let pipe = v.full_domain()[0];
            v.assign(pipe).unwrap();
        }
        csp
    }

    #[test]
    fn picks_highest_scoring_untried_move() {
        let csp = fully_assigned(2);
        // score every (cell, direction) by direction index, so Left (index 3)
        // always wins when available.
        let oracle = StubOracle::new(|encoded: &[f32]| {
            (0..encoded.len()).map(|i| (i % 4) as f32).collect()
        });
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();
        let (var, pipe) = pick_move(&csp, &oracle, &mut memo, &token)
            .unwrap()
            .unwrap();
        assert!(csp.variables[var.0].full_domain().contains(&pipe));
    }

    #[test]
    fn memoized_moves_are_not_repeated() {
        let csp = fully_assigned(2);
        let oracle = StubOracle::new(|encoded: &[f32]| vec![1.0; encoded.len()]);
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();
        let first = pick_move(&csp, &oracle, &mut memo, &token).unwrap().unwrap();
        let second = pick_move(&csp, &oracle, &mut memo, &token).unwrap().unwrap();
        assert_ne!((first.0, first.1.encode()), (second.0, second.1.encode()));
    }

    #[test]
    fn rejects_mismatched_oracle_output() {
        let csp = fully_assigned(2);
        let oracle = StubOracle::new(|_: &[f32]| vec![1.0, 2.0]);
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();
        assert!(matches!(
            pick_move(&csp, &oracle, &mut memo, &token),
            Err(Error::OracleShapeMismatch { .. })
        ));
    }

    #[test]
    fn cancelled_token_discards_pending_move() {
        let csp = fully_assigned(2);
        let oracle = StubOracle::new(|encoded: &[f32]| vec![1.0; encoded.len()]);
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();
        token.cancel();
        let result = pick_move(&csp, &oracle, &mut memo, &token).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rejects_board_with_an_unassigned_cell() {
        let csp = Csp::new(2).unwrap();
        let oracle = StubOracle::new(|encoded: &[f32]| vec![1.0; encoded.len()]);
        let mut memo = TriedMoveMemo::new();
        let token = CancellationToken::new();
        assert!(matches!(
            pick_move(&csp, &oracle, &mut memo, &token),
            Err(Error::InvalidBoard { .. })
        ));
    }

    #[test]
    fn is_solved_false_while_incomplete() {
        let csp = Csp::new(2).unwrap();
        assert!(!is_solved(&csp).unwrap());
    }
}
