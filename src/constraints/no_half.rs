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

//! The no-half-connections binary constraint, used for both
//! horizontal and vertical neighbor pairs: `facing_dir` is the direction
//! from the first variable towards the second (`Right` for a horizontal
//! pair, `Down` for a vertical pair).

use crate::csp::{assigned, require_scope_assigned, Constraint, PruneLog, VarId, Variable};
use crate::error::Error;
use crate::grid::Direction;

/// Binds one pair of grid-adjacent cells: `near` faces `far` across
/// `facing_dir`.
pub struct NoHalfConnection {
    scope: [VarId; 2],
    facing_dir: Direction,
}

impl NoHalfConnection {
    pub fn new(near: VarId, far: VarId, facing_dir: Direction) -> NoHalfConnection {
        NoHalfConnection {
            scope: [near, far],
            facing_dir,
        }
    }

    fn near(&self) -> VarId {
        self.scope[0]
    }

    fn far(&self) -> VarId {
        self.scope[1]
    }
}

impl Constraint for NoHalfConnection {
    fn name(&self) -> &'static str {
        "no-half-connection"
    }

    fn scope(&self) -> &[VarId] {
        &self.scope
    }

    fn validate(&self, vars: &[Variable]) -> Result<bool, Error> {
        require_scope_assigned(vars, &self.scope, self.name())?;
        let near = assigned(vars, self.near())?;
        let far = assigned(vars, self.far())?;
        Ok(near.opens(self.facing_dir) == far.opens(self.facing_dir.opposite()))
    }

    fn prune(&self, vars: &mut [Variable]) -> PruneLog {
        let near_assigned = vars[self.near().0].assignment();
        let far_assigned = vars[self.far().0].assignment();

        // Monotone: only prune when exactly one side is assigned.
        let mut log = PruneLog::new();
        match (near_assigned, far_assigned) {
            (Some(near), None) => {
                let facing = self.facing_dir;
                let wants = near.opens(facing);
                let removed = vars[self.far().0]
                    .prune_where(|p| p.opens(facing.opposite()) != wants);
                if !removed.is_empty() {
                    log.push((self.far(), removed));
                }
            }
            (None, Some(far)) => {
                let facing = self.facing_dir;
                let wants = far.opens(facing.opposite());
                let removed = vars[self.near().0].prune_where(|p| p.opens(facing) != wants);
                if !removed.is_empty() {
                    log.push((self.near(), removed));
                }
            }
            _ => {}
        }
        log
    }
}
