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

//! Backtracking search over the CSP: an explicit stack of
//! frames, never recursion, so a pathological `n` can't blow the call stack
//! (same discipline as the no-cycles/connected DFS helpers).
//!
//! Variable ordering: once at least one cell is assigned, the next
//! variable is the unassigned cell with the smallest Manhattan distance to
//! the frontier (the set of unassigned cells already touching an assigned
//! one); ties break on the lower cell index. Before anything is assigned,
//! there is no frontier yet, so the cell with the smallest active domain is
//! picked first (a standard minimum-remaining-values tiebreak).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use tracing::{debug, trace};

use crate::cancel::CancellationToken;
use crate::config::{SearchMode, SolveConfig};
use crate::csp::{Csp, VarId};
use crate::error::Error;
use crate::pipe::Pipe;
use crate::propagate::{propagate, rewind, Undo};

/// One level of the search stack: the variable being tried, the candidate
/// values captured when the frame was entered (already narrowed by every
/// ancestor's propagation), a cursor into them, and the propagation undo for
/// whichever candidate is currently assigned (`None` between candidates).
struct Frame {
    var: VarId,
    candidates: Vec<Pipe>,
    cursor: usize,
    active: Option<Undo>,
}

/// Runs the backtracking search for an `n x n` grid and returns the
/// canonical solution strings found, in discovery order, bounded by
/// `config.solution_cap`.
pub fn solve(n: usize, config: &SolveConfig) -> Result<Vec<String>, Error> {
    solve_cancellable(n, config, &CancellationToken::new())
}

/// Same as [`solve`], but checked for cooperative cancellation at
/// the top of every loop iteration, i.e. right after the AC-3 call for the
/// current trial returns. On cancellation every outstanding propagation log
/// is rewound before returning, so the grid is left exactly as
/// `Csp::new(n)` would have produced it and nothing observable leaks out of
/// a cancelled run except the solutions already recorded.
pub fn solve_cancellable(
    n: usize,
    config: &SolveConfig,
    cancellation: &CancellationToken,
) -> Result<Vec<String>, Error> {
    let mut csp = Csp::new(n)?;
    let mut solutions = Vec::new();
    let mut rng = match config.mode {
        SearchMode::Randomized { seed } => Some(StdRng::seed_from_u64(seed)),
        SearchMode::Deterministic => None,
    };

    let mut stack: Vec<Frame> = Vec::new();
    if let Some(first) = select_variable(&csp) {
        stack.push(new_frame(&csp, first, rng.as_mut()));
    }

    'outer: while let Some(frame) = stack.last_mut() {
        if cancellation.is_cancelled() {
            unwind_all(&mut csp, &mut stack);
            break 'outer;
        }

        if let Some(undo) = frame.active.take() {
            rewind(&mut csp, &undo);
            csp.variables[frame.var.0].unassign();
        }

        if frame.cursor >= frame.candidates.len() {
            stack.pop();
            continue;
        }

        let pipe = frame.candidates[frame.cursor];
        frame.cursor += 1;
        let var = frame.var;

        csp.variables[var.0].assign(pipe)?;
        let seed_constraints = csp.constraints_mentioning(var).to_vec();
        let propagated = propagate(&mut csp, &seed_constraints)?;

        let Some(undo) = propagated else {
            csp.variables[var.0].unassign();
            continue;
        };

        if csp.is_fully_assigned() {
            if csp.validate_all()? {
                let solution = csp.canonical_string()?;
                debug!(n, solution = %solution, "found solution");
                solutions.push(solution);
                if let Some(cap) = config.solution_cap {
                    if solutions.len() >= cap {
                        break 'outer;
                    }
                }
            }
            rewind(&mut csp, &undo);
            csp.variables[var.0].unassign();
            continue;
        }

        stack.last_mut().unwrap().active = Some(undo);

        match select_variable(&csp) {
            Some(next) => {
                let frame = new_frame(&csp, next, rng.as_mut());
                stack.push(frame);
            }
            None => {
                // Every variable assigned but `is_fully_assigned` said
                // otherwise - unreachable for a consistent model, but fail
                // closed rather than loop.
                trace!("no candidate variable despite incomplete assignment");
                break 'outer;
            }
        }
    }

    Ok(solutions)
}

/// Rewinds every frame still holding an active propagation log and clears
/// the stack, used to leave the engine reusable after a cancelled run.
fn unwind_all(csp: &mut Csp, stack: &mut Vec<Frame>) {
    while let Some(mut frame) = stack.pop() {
        if let Some(undo) = frame.active.take() {
            rewind(csp, &undo);
            csp.variables[frame.var.0].unassign();
        }
    }
}

fn new_frame(csp: &Csp, var: VarId, rng: Option<&mut StdRng>) -> Frame {
    let mut candidates = csp.variables[var.0].active_domain().to_vec();
    if let Some(rng) = rng {
        candidates.shuffle(rng);
    }
    Frame {
        var,
        candidates,
        cursor: 0,
        active: None,
    }
}

/// Picks the next variable to branch on, per the ordering described above.
fn select_variable(csp: &Csp) -> Option<VarId> {
    let unassigned = csp.unassigned();
    if unassigned.is_empty() {
        return None;
    }

    let frontier = csp.frontier();
    if frontier.is_empty() {
        return unassigned
            .into_iter()
            .min_by_key(|v| (csp.variables[v.0].active_domain().len(), v.0));
    }

    let n = csp.n;
    let cell_rc = |i: usize| ((i / n) as isize, (i % n) as isize);
    unassigned.into_iter().min_by_key(|v| {
        let (r1, c1) = cell_rc(v.0);
        let dist = frontier
            .iter()
            .map(|&f| {
                let (r2, c2) = cell_rc(f);
                (r1 - r2).abs() + (c1 - c2).abs()
            })
            .min()
            .unwrap_or(isize::MAX);
        (dist, v.0 as isize)
    })
}
