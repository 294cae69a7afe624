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

//! AC-3-style arc consistency: drain a worklist of constraints,
//! prune each one's scope, and re-enqueue every constraint that mentions a
//! variable whose active domain just shrank.
//!
//! The whole propagation run produces one [`Undo`] log: a flat, chronological
//! record of every `(VarId, Vec<Removal>)` pair any constraint's `prune` call
//! returned. Rewinding a run means replaying that log back-to-front, handing
//! each entry to [`crate::csp::Variable::undo`] in turn - since `undo` itself
//! reverses the single log it's given, this combination restores both
//! cross-call LIFO order and the exact original within-call ordering.

use std::collections::VecDeque;

use tracing::trace;

use crate::csp::{Constraint, ConstraintId, Csp, PruneLog, Removal, VarId};
use crate::error::Error;

/// One flattened propagation run's undo log, in the chronological order the
/// removals happened.
#[derive(Debug, Default, Clone)]
pub struct Undo(Vec<(VarId, Vec<Removal>)>);

impl Undo {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend(&mut self, log: PruneLog) {
        self.0.extend(log);
    }
}

/// Runs AC-3 to a fixpoint starting from `seed` (typically: the constraints
/// mentioning the variable just assigned). Returns the combined undo log, or
/// `Ok(None)` if propagation emptied some variable's active domain (the
/// assignment that triggered this run cannot be extended to a solution).
pub fn propagate(csp: &mut Csp, seed: &[ConstraintId]) -> Result<Option<Undo>, Error> {
    let mut queued = vec![false; csp.constraints.len()];
    let mut worklist: VecDeque<ConstraintId> = VecDeque::new();
    for &id in seed {
        if !queued[id.0] {
            queued[id.0] = true;
            worklist.push_back(id);
        }
    }

    let mut undo = Undo::default();

    while let Some(id) = worklist.pop_front() {
        queued[id.0] = false;
        let log = csp.constraints[id.0].prune(&mut csp.variables);
        if log.is_empty() {
            continue;
        }

        let touched: Vec<VarId> = log.iter().map(|(v, _)| *v).collect();
        trace!(constraint = csp.constraints[id.0].name(), touched = touched.len(), "pruned");

        for v in &touched {
            if csp.variables[v.0].active_domain().is_empty() {
                undo.extend(log);
                rewind(csp, &undo);
                return Ok(None);
            }
        }
        undo.extend(log);

        for v in touched {
            for &mentioned in csp.constraints_mentioning(v) {
                if !queued[mentioned.0] {
                    queued[mentioned.0] = true;
                    worklist.push_back(mentioned);
                }
            }
        }
    }

    Ok(Some(undo))
}

/// Rewinds every removal recorded in `undo`, restoring the domains to their
/// state before the propagation run that produced it.
pub fn rewind(csp: &mut Csp, undo: &Undo) {
    for (v, removals) in undo.0.iter().rev() {
        csp.variables[v.0].undo(removals);
    }
}
