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

//! Tried-move memoization for the move-picker: once a `(cell, pipe)` move
//! has been offered for a given board fingerprint, it is never offered
//! again for that same fingerprint, so a rejected suggestion doesn't loop
//! back as the oracle's top pick on the next call. Uses `fxhash::FxHashMap`,
//! a fast non-cryptographic hasher appropriate for this single-threaded,
//! in-process bookkeeping.

use fxhash::{FxHashMap, FxHashSet};

/// Remembers, per board fingerprint, which `(cell, pipe domain index)` moves
/// have already been tried.
#[derive(Debug, Default)]
pub struct TriedMoveMemo {
    tried: FxHashMap<String, FxHashSet<(usize, usize)>>,
}

impl TriedMoveMemo {
    pub fn new() -> TriedMoveMemo {
        TriedMoveMemo::default()
    }

    /// Whether `(cell, pipe_index)` has already been offered for `fingerprint`.
    pub fn was_tried(&self, fingerprint: &str, cell: usize, pipe_index: usize) -> bool {
        self.tried
            .get(fingerprint)
            .map(|s| s.contains(&(cell, pipe_index)))
            .unwrap_or(false)
    }

    /// Records that `(cell, pipe_index)` has now been offered for `fingerprint`.
    pub fn record(&mut self, fingerprint: &str, cell: usize, pipe_index: usize) {
        self.tried
            .entry(fingerprint.to_string())
            .or_default()
            .insert((cell, pipe_index));
    }
}
