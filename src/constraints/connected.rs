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

//! The global connected constraint.
//!
//! The validator requires a DFS from cell 0 over confirmed connections to
//! visit every cell. The pruner builds a *pseudo-assignment*: assigned
//! variables contribute their real pipe, unassigned variables contribute the
//! direction-wise OR of their active domain (the most generous pipe that
//! *could* still be chosen). If even that best case can't connect, the
//! partial assignment is already dead - the whole active domain of some
//! unassigned variable is wiped to force a backtrack. The choice of *which*
//! variable to wipe in that case (the first unassigned variable encountered)
//! is a policy decision documented as such in DESIGN.md rather than left as
//! an unremarked implementation accident.
//!
//! Otherwise, it looks for dead-end chains in the pseudo-assignment graph -
//! runs of degree-1/degree-2 cells hanging off the rest of the structure -
//! and forces every unassigned cell along such a chain to keep the opening
//! that connects it back to the previous cell in the chain, since losing
//! that opening would strand everything beyond it.

use crate::csp::{require_scope_assigned, Constraint, PruneLog, VarId, Variable};
use crate::error::Error;
use crate::grid::{connections, neighbors, Direction, ALL_DIRECTIONS, OFF_GRID};

pub struct Connected {
    scope: Vec<VarId>,
    n: usize,
}

impl Connected {
    pub fn new(scope: Vec<VarId>, n: usize) -> Connected {
        Connected { scope, n }
    }
}

impl Constraint for Connected {
    fn name(&self) -> &'static str {
        "connected"
    }

    fn scope(&self) -> &[VarId] {
        &self.scope
    }

    fn validate(&self, vars: &[Variable]) -> Result<bool, Error> {
        require_scope_assigned(vars, &self.scope, self.name())?;
        let n = self.n;
        let openings: Vec<[bool; 4]> = vars
            .iter()
            .enumerate()
            .map(|(i, v)| v.assignment_or_err(i).map(|p| p.openings()))
            .collect::<Result<_, _>>()?;
        Ok(is_connected(&openings, n))
    }

    fn prune(&self, vars: &mut [Variable]) -> PruneLog {
        let n = self.n;
        let pseudo = pseudo_openings(vars, n);

        if !is_connected(&pseudo, n) {
            if let Some(v) = vars.iter_mut().find(|v| !v.is_assigned()) {
                let removed = v.prune_all();
                if removed.is_empty() {
                    return PruneLog::new();
                }
                return vec![(VarId(v.location), removed)];
            }
            return PruneLog::new();
        }

        let requirements = dead_end_requirements(&pseudo, n);
        let mut log = PruneLog::new();
        for (cell, dir) in requirements {
            if vars[cell].is_assigned() {
                continue;
            }
            let removed = vars[cell].prune_where(|p| !p.opens(dir));
            if !removed.is_empty() {
                log.push((VarId(cell), removed));
            }
        }
        log
    }
}

/// Direction-wise OR of `domain`'s openings.
fn union_openings(domain: &[crate::pipe::Pipe]) -> [bool; 4] {
    let mut out = [false; 4];
    for p in domain {
        let o = p.openings();
        for d in 0..4 {
            out[d] |= o[d];
        }
    }
    out
}

fn pseudo_openings(vars: &[Variable], n: usize) -> Vec<[bool; 4]> {
    (0..n * n)
        .map(|i| {
            vars[i]
                .assignment()
                .map(|p| p.openings())
                .unwrap_or_else(|| union_openings(vars[i].active_domain()))
        })
        .collect()
}

/// Confirmed (mutual) directions at cell `i` given a board-wide opening
/// table, using the same definition as [`crate::grid::connections`].
fn confirmed_dirs(i: usize, openings: &[[bool; 4]], n: usize) -> Vec<Direction> {
    let ns = neighbors(i, n);
    let neighbor_openings: [Option<[bool; 4]>; 4] = std::array::from_fn(|d| {
        let idx = ns[d];
        if idx == OFF_GRID {
            None
        } else {
            Some(openings[idx as usize])
        }
    });
    let conn = connections(openings[i], neighbor_openings);
    ALL_DIRECTIONS
        .into_iter()
        .filter(|d| conn[d.index()])
        .collect()
}

fn is_connected(openings: &[[bool; 4]], n: usize) -> bool {
    let count = n * n;
    if count == 0 {
        return true;
    }
    let mut visited = vec![false; count];
    let mut stack = vec![0usize];
    visited[0] = true;
    let mut seen = 1;
    while let Some(cur) = stack.pop() {
        for d in confirmed_dirs(cur, openings, n) {
            let next = neighbors(cur, n)[d.index()] as usize;
            if !visited[next] {
                visited[next] = true;
                seen += 1;
                stack.push(next);
            }
        }
    }
    seen == count
}

/// Finds, for every dead-end chain in the pseudo-assignment graph, the
/// direction each cell along the chain must keep open to stay linked to the
/// previous cell. Returns `(cell, required_direction)` pairs.
fn dead_end_requirements(openings: &[[bool; 4]], n: usize) -> Vec<(usize, Direction)> {
    let count = n * n;
    let degree: Vec<Vec<Direction>> = (0..count)
        .map(|i| confirmed_dirs(i, openings, n))
        .collect();

    let mut requirements = Vec::new();
    let mut chain_visited = vec![false; count];

    for start in 0..count {
        if degree[start].len() != 1 {
            continue;
        }
        let mut current = start;
        let mut dir = degree[start][0];
        loop {
            let next = neighbors(current, n)[dir.index()];
            if next == OFF_GRID {
                break;
            }
            let next = next as usize;
            if chain_visited[next] {
                break;
            }
            let incoming = dir.opposite();
            requirements.push((next, incoming));
            chain_visited[next] = true;

            let remaining: Vec<Direction> = degree[next]
                .iter()
                .copied()
                .filter(|d| *d != incoming)
                .collect();
            if remaining.len() != 1 {
                break;
            }
            current = next;
            dir = remaining[0];
        }
    }
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_path_is_connected() {
        // 1x3 line (conceptually n=3 but only checking helper logic with a
        // hand-built opening table on a 3x3 grid restricted to row 0)
        let n = 3;
        let mut openings = vec![[false; 4]; n * n];
        // 0 - 1 - 2 chain along row 0: cell0 opens Right, cell1 opens Left+Right, cell2 opens Left
        openings[0] = [false, true, false, false];
        openings[1] = [false, true, false, true];
        openings[2] = [false, false, false, true];
        // leave rest disconnected (degree 0) - only checking cells 0,1,2 matter for this synthetic probe
        assert!(confirmed_dirs(0, &openings, n).contains(&Direction::Right));
        assert!(confirmed_dirs(1, &openings, n).contains(&Direction::Left));
    }

    #[test]
    fn pseudo_openings_uses_assignment_when_present() {
        let mut vars = vec![Variable::new(0, crate::pipe::base_pipes())];
        let pipe = vars[0].full_domain()[0];
        vars[0].assign(pipe).unwrap();
        let p = pseudo_openings(&vars, 1);
        assert_eq!(p[0], pipe.openings());
    }
}
