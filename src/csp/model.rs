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

//! The `Csp` model: the full set of variables and constraints for one n x n
//! pipes puzzle instance, plus the variable -> mentioning-constraints index
//! the propagation engine needs to build its worklist.
//!
//! All long-lived state lives here: no global state, everything confined to
//! one owning object. Constraints keep stable integer indices into `Csp`,
//! not references, so there are no back-pointers between a `Variable` and
//! the solver.

use std::collections::HashSet;

use crate::constraints::{connected::Connected, no_cycles::NoCycles, no_half::NoHalfConnection};
use crate::csp::constraint::Constraint;
use crate::csp::variable::{VarId, Variable};
use crate::error::Error;
use crate::grid::Direction;
use crate::pipe::cell_domain;

/// Stable index of a constraint inside [`Csp::constraints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub usize);

/// A complete pipes-puzzle CSP instance for one `n x n` grid.
pub struct Csp {
    /// Grid side length.
    pub n: usize,
    /// One variable per cell, indexed by linear cell index (== `VarId.0`).
    pub variables: Vec<Variable>,
    /// Every constraint in the model, in a fixed order.
    pub constraints: Vec<Box<dyn Constraint>>,
    /// `mentions[v.0]` is the list of constraint ids whose scope includes
    /// variable `v`; used to seed/extend the AC-3 worklist.
    mentions: Vec<Vec<ConstraintId>>,
}

impl Csp {
    /// Builds the full CSP for an `n x n` grid: one variable per cell with
    /// its edge-filtered domain, and the full constraint set
    /// (no-half-connections horizontal/vertical, no-cycles, connected).
    /// Rejects `n < 2` (`n = 1` is out of scope: a single cell has no
    /// neighbor to connect to).
    pub fn new(n: usize) -> Result<Csp, Error> {
        if n < 2 {
            return Err(Error::UnsupportedSize(n));
        }

        let variables: Vec<Variable> = (0..n * n)
            .map(|i| Variable::new(i, cell_domain(i, n)))
            .collect();

        let mut constraints: Vec<Box<dyn Constraint>> = Vec::new();

        for row in 0..n {
            for col in 0..n {
                let i = row * n + col;
                if col + 1 < n {
                    let right = i + 1;
                    constraints.push(Box::new(NoHalfConnection::new(
                        VarId(i),
                        VarId(right),
                        Direction::Right,
                    )));
                }
                if row + 1 < n {
                    let down = i + n;
                    constraints.push(Box::new(NoHalfConnection::new(
                        VarId(i),
                        VarId(down),
                        Direction::Down,
                    )));
                }
            }
        }

        let all_vars: Vec<VarId> = (0..n * n).map(VarId).collect();
        constraints.push(Box::new(NoCycles::new(all_vars.clone(), n)));
        constraints.push(Box::new(Connected::new(all_vars, n)));

        let mut mentions = vec![Vec::new(); n * n];
        for (idx, c) in constraints.iter().enumerate() {
            for v in c.scope() {
                mentions[v.0].push(ConstraintId(idx));
            }
        }

        Ok(Csp {
            n,
            variables,
            constraints,
            mentions,
        })
    }

    /// Constraints whose scope mentions variable `v`.
    pub fn constraints_mentioning(&self, v: VarId) -> &[ConstraintId] {
        &self.mentions[v.0]
    }

    /// Indices of every variable that is currently unassigned.
    pub fn unassigned(&self) -> Vec<VarId> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_assigned())
            .map(|(i, _)| VarId(i))
            .collect()
    }

    /// Whether every variable currently has an assignment.
    pub fn is_fully_assigned(&self) -> bool {
        self.variables.iter().all(|v| v.is_assigned())
    }

    /// Runs every constraint's validator over the current (assumed fully
    /// assigned) state. Returns `Ok(true)` only if all of them pass.
    pub fn validate_all(&self) -> Result<bool, Error> {
        for c in &self.constraints {
            if !c.validate(&self.variables)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The frontier: the set of unassigned cells that are grid-adjacent to
    /// at least one assigned cell.
    pub fn frontier(&self) -> HashSet<usize> {
        let mut out = HashSet::new();
        for v in &self.variables {
            if !v.is_assigned() {
                continue;
            }
            for n_idx in crate::grid::neighbors(v.location, self.n) {
                if n_idx != crate::grid::OFF_GRID {
                    let n_idx = n_idx as usize;
                    if !self.variables[n_idx].is_assigned() {
                        out.insert(n_idx);
                    }
                }
            }
        }
        out
    }

    /// Renders the current, assumed-complete assignment as the canonical
    /// solution string: the concatenation of each cell's 4-char pipe
    /// encoding in row-major order.
    pub fn canonical_string(&self) -> Result<String, Error> {
        let mut out = String::with_capacity(4 * self.variables.len());
        for (i, v) in self.variables.iter().enumerate() {
            let p = v.assignment_or_err(i)?;
            out.push_str(&p.encode());
        }
        Ok(out)
    }
}
