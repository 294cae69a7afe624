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

//! The CSP variable: a cell's full domain, active (pruned) domain, and
//! optional current assignment.

use crate::error::Error;
use crate::pipe::Pipe;

/// Identifies a variable by position in [`crate::csp::model::Csp::variables`],
/// which is always the same as its grid cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

/// One entry of a pruning log: the pipe removed from the active domain, and
/// the index it used to occupy, so that undo can restore it to the exact
/// same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub index: usize,
    pub pipe: Pipe,
}

/// A grid cell's CSP variable.
///
/// Invariants maintained by every method below:
/// * `active` is always a sub-sequence of `full`.
/// * if `assignment` is `Some(p)` then `p` is a member of `full` (but not
///   necessarily still a member of `active`, since the search assigns a
///   value before it has necessarily confirmed it survives propagation).
/// * `active` and `full` are never reordered: pruning removes elements and
///   preserves the relative order of the survivors.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Linear grid index of the cell this variable represents.
    pub location: usize,
    full: Vec<Pipe>,
    active: Vec<Pipe>,
    assignment: Option<Pipe>,
}

impl Variable {
    /// Creates a new, unassigned variable whose full and active domains both
    /// start out as `domain` (in its given order).
    pub fn new(location: usize, domain: Vec<Pipe>) -> Variable {
        Variable {
            location,
            full: domain.clone(),
            active: domain,
            assignment: None,
        }
    }

    /// The variable's full (pre-propagation) domain.
    pub fn full_domain(&self) -> &[Pipe] {
        &self.full
    }

    /// The variable's current active domain, in surviving order.
    pub fn active_domain(&self) -> &[Pipe] {
        &self.active
    }

    /// Current assignment, if any.
    pub fn assignment(&self) -> Option<Pipe> {
        self.assignment
    }

    /// Current assignment, failing fast if the variable has none. Used by
    /// validators, which only ever run against fully assigned
    /// scopes.
    pub fn assignment_or_err(&self, cell: usize) -> Result<Pipe, Error> {
        self.assignment.ok_or(Error::UnassignedRead { cell })
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// Assigns `pipe` to this variable. Fails fast if `pipe` is not a member
    /// of the full domain (an invariant violation).
    pub fn assign(&mut self, pipe: Pipe) -> Result<(), Error> {
        if !self.full.contains(&pipe) {
            return Err(Error::NotInDomain {
                cell: self.location,
                value: format!("{:?}", pipe.openings()),
            });
        }
        self.assignment = Some(pipe);
        Ok(())
    }

    /// Clears the current assignment (used when a search frame is reused for
    /// a new trial).
    pub fn unassign(&mut self) {
        self.assignment = None;
    }

    /// Removes every pipe in `active` for which `predicate` returns true,
    /// returning the removal log (original index + value) in the order the
    /// values were encountered. Monotone: never re-adds anything.
    pub fn prune_where<F: Fn(Pipe) -> bool>(&mut self, predicate: F) -> Vec<Removal> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.active.len());
        for (index, pipe) in self.active.iter().enumerate() {
            if predicate(*pipe) {
                removed.push(Removal { index, pipe: *pipe });
            } else {
                kept.push(*pipe);
            }
        }
        self.active = kept;
        removed
    }

    /// Empties the active domain entirely, returning the removal log.
    pub fn prune_all(&mut self) -> Vec<Removal> {
        self.prune_where(|_| true)
    }

    /// Undoes a single removal log produced by one `prune_*` call. Each
    /// `Removal::index` names a position in the array as it stood right
    /// before that call; reinserting in ascending-index order keeps that
    /// invariant true at every step, since each insertion only shifts
    /// elements at or after it, and those are exactly the ones whose
    /// original-index target hasn't been reached yet. Reinserting in
    /// descending order would instead insert a later removal's value before
    /// its predecessor has made room, shifting it one slot too far right.
    pub fn undo(&mut self, removals: &[Removal]) {
        for r in removals {
            let at = r.index.min(self.active.len());
            self.active.insert(at, r.pipe);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::base_pipes;

    fn sample() -> Variable {
        Variable::new(0, base_pipes())
    }

    #[test]
    fn assign_rejects_value_outside_full_domain() {
        let mut v = sample();
        let bogus = Pipe::new([true, true, true, true]);
        assert!(matches!(
            v.assign(bogus),
            Err(Error::NotInDomain { .. })
        ));
    }

    #[test]
    fn prune_then_undo_restores_exact_order() {
        let mut v = sample();
        let before = v.active_domain().to_vec();
        let removed = v.prune_where(|p| p.degree() == 1);
        assert!(v.active_domain().len() < before.len());
        v.undo(&removed);
        assert_eq!(v.active_domain(), before.as_slice());
    }

    #[test]
    fn undo_after_two_prunes_restores_order_lifo() {
        let mut v = sample();
        let before = v.active_domain().to_vec();
        let first = v.prune_where(|p| p.degree() == 1);
        let second = v.prune_where(|p| p.degree() == 3);
        // undo in reverse chronological order: second prune first.
        v.undo(&second);
        v.undo(&first);
        assert_eq!(v.active_domain(), before.as_slice());
    }

    #[test]
    fn prune_all_empties_domain() {
        let mut v = sample();
        let removed = v.prune_all();
        assert!(v.active_domain().is_empty());
        assert_eq!(removed.len(), 14);
    }

    proptest::proptest! {
        #[test]
        fn undo_restores_exact_order_for_any_pruned_subset(
            mask in proptest::collection::vec(proptest::bool::ANY, 14),
        ) {
            let mut v = sample();
            let before = v.active_domain().to_vec();
            let removed = v.prune_where(|p| {
                let idx = before.iter().position(|b| *b == p).unwrap();
                mask[idx]
            });
            v.undo(&removed);
            assert_eq!(v.active_domain(), before.as_slice());
        }

        #[test]
        fn undo_restores_exact_order_across_two_sequential_prunes(
            mask1 in proptest::collection::vec(proptest::bool::ANY, 14),
            mask2 in proptest::collection::vec(proptest::bool::ANY, 14),
        ) {
            let mut v = sample();
            let before = v.active_domain().to_vec();
            let survivors_before_first = before.clone();
            let first = v.prune_where(|p| {
                let idx = survivors_before_first.iter().position(|b| *b == p).unwrap();
                mask1[idx]
            });
            let survivors_after_first = v.active_domain().to_vec();
            let second = v.prune_where(|p| {
                let idx = survivors_after_first.iter().position(|b| *b == p).unwrap();
                mask2[idx]
            });
            v.undo(&second);
            v.undo(&first);
            assert_eq!(v.active_domain(), before.as_slice());
        }
    }
}
