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

//! The `Constraint` abstraction: a named, scoped pair of a validator and a
//! pruner. It is the contract a concrete constraint (no-half-connections,
//! no-cycles, connected) implements, and everything else in
//! `csp`/`propagate`/`search` is written only in terms of it.

use crate::csp::variable::{Removal, VarId, Variable};
use crate::error::Error;

/// What a [`Constraint::prune`] call removed, per variable it touched.
pub type PruneLog = Vec<(VarId, Vec<Removal>)>;

/// A constraint over an ordered scope of variables.
///
/// * `validate` is only ever called once every variable in `scope()` is
///   assigned; calling it otherwise is an invariant violation, and
///   implementations must return `Error::UnassignedScope` rather than guess.
/// * `prune` may be called with any mix of assigned/unassigned variables. It
///   must be monotone (never re-adds a value) and sound (never removes a
///   value compatible with some extension to a complete satisfying
///   assignment). It must perform the removals in place on `vars` *and*
///   return the exact diff - callers rely on both the mutation (so that
///   downstream constraints observe the narrower domains) and the returned
///   log (so the search can undo it on backtrack). See DESIGN.md for why
///   this dual contract is kept rather than split into "compute" +  "apply".
pub trait Constraint {
    /// Stable name, used in error messages and tracing spans.
    fn name(&self) -> &'static str;
    /// The ordered scope this constraint is defined over.
    fn scope(&self) -> &[VarId];
    /// Whether the (fully assigned) scope satisfies this constraint.
    fn validate(&self, vars: &[Variable]) -> Result<bool, Error>;
    /// Prunes `vars` in place (restricted to indices named by `scope()`) and
    /// returns what it removed.
    fn prune(&self, vars: &mut [Variable]) -> PruneLog;
}

/// Convenience: fetch the assignment of variable `id`.
pub fn assigned(vars: &[Variable], id: VarId) -> Result<crate::pipe::Pipe, Error> {
    vars[id.0].assignment_or_err(vars[id.0].location)
}

/// Checks that every variable in `scope` is assigned, returning
/// [`Error::UnassignedScope`] named after `constraint_name` otherwise. Every
/// `validate` implementation in this crate calls this first, so a caller
/// that validates too early always gets one uniform error naming the
/// constraint, rather than whichever individual variable's
/// [`Error::UnassignedRead`] happened to surface first.
pub fn require_scope_assigned(
    vars: &[Variable],
    scope: &[VarId],
    constraint_name: &'static str,
) -> Result<(), Error> {
    if scope.iter().any(|id| !vars[id.0].is_assigned()) {
        return Err(Error::UnassignedScope {
            name: constraint_name,
        });
    }
    Ok(())
}
