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

//! The global no-cycles constraint.
//!
//! The validator treats the full assignment as an undirected graph of
//! confirmed connections and rejects it if that graph has a cycle. The
//! pruner looks for two distinct assigned cells "touching" the same
//! unassigned neighbor from two different sides and forbids that neighbor
//! from ever wiring both of those sides together, since doing so would
//! close the loop between the two already-committed branches.
//!
//! Per the open question recorded in DESIGN.md, this pruner
//! reports (and mutates) at most one such conflict per call; AC-3 keeps
//! re-invoking it (because a successful prune re-enqueues every constraint
//! mentioning the narrowed variable, including this one) until no conflict
//! remains.

use std::collections::HashMap;

use crate::csp::{require_scope_assigned, Constraint, PruneLog, VarId, Variable};
use crate::error::Error;
use crate::grid::{connections, neighbors, Direction, ALL_DIRECTIONS, OFF_GRID};

pub struct NoCycles {
    scope: Vec<VarId>,
    n: usize,
}

impl NoCycles {
    pub fn new(scope: Vec<VarId>, n: usize) -> NoCycles {
        NoCycles { scope, n }
    }
}

impl Constraint for NoCycles {
    fn name(&self) -> &'static str {
        "no-cycles"
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

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n * n];
        for i in 0..n * n {
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
            for d in ALL_DIRECTIONS {
                if conn[d.index()] {
                    adjacency[i].push(ns[d.index()] as usize);
                }
            }
        }

        Ok(!has_cycle(&adjacency, n * n))
    }

    fn prune(&self, vars: &mut [Variable]) -> PruneLog {
        // touches[neighbor_idx] = list of (direction-at-neighbor, source cell)
        let mut touches: HashMap<usize, Vec<(Direction, usize)>> = HashMap::new();

        for v in vars.iter() {
            let Some(pipe) = v.assignment() else {
                continue;
            };
            let loc = v.location;
            let ns = neighbors(loc, self.n);
            for d in ALL_DIRECTIONS {
                if !pipe.opens(d) {
                    continue;
                }
                let nb = ns[d.index()];
                if nb == OFF_GRID {
                    continue;
                }
                let nb = nb as usize;
                if vars[nb].is_assigned() {
                    continue;
                }
                touches
                    .entry(nb)
                    .or_default()
                    .push((d.opposite(), loc));
            }
        }

        let mut targets: Vec<usize> = touches.keys().copied().collect();
        targets.sort_unstable();

        for nb in targets.drain(..) {
            let entries = &touches[&nb];
            if entries.len() < 2 {
                continue;
            }
            let (d1, _) = entries[0];
            let (d2, _) = entries[1];
            if d1 == d2 {
                continue;
            }
            let removed = vars[nb].prune_where(|p| p.opens(d1) && p.opens(d2));
            if !removed.is_empty() {
                return vec![(VarId(nb), removed)];
            }
        }
        Vec::new()
    }
}

/// Iterative (explicit-stack) cycle detection over an undirected adjacency
/// list covering every one of `count` nodes, tolerant of disconnected graphs
/// (a disconnected graph is a connectivity violation, not a cycle
/// violation, and is caught by the `Connected` constraint instead).
fn has_cycle(adjacency: &[Vec<usize>], count: usize) -> bool {
    let mut visited = vec![false; count];
    for start in 0..count {
        if visited[start] {
            continue;
        }
        // stack of (node, parent)
        let mut stack = vec![(start, usize::MAX)];
        visited[start] = true;
        while let Some((node, parent)) = stack.pop() {
            for &next in &adjacency[node] {
                if next == parent {
                    continue;
                }
                if visited[next] {
                    return true;
                }
                visited[next] = true;
                stack.push((next, node));
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_no_cycle_in_a_tree() {
        // path 0 - 1 - 2
        let adjacency = vec![vec![1], vec![0, 2], vec![1]];
        assert!(!has_cycle(&adjacency, 3));
    }

    #[test]
    fn detects_a_triangle_cycle() {
        let adjacency = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
        assert!(has_cycle(&adjacency, 3));
    }

    #[test]
    fn detects_cycle_in_disconnected_graph() {
        // component {0,1} is a simple edge, component {2,3,4} has a triangle-ish cycle
        let adjacency = vec![
            vec![1],
            vec![0],
            vec![3, 4],
            vec![2, 4],
            vec![2, 3],
        ];
        assert!(has_cycle(&adjacency, 5));
    }
}
