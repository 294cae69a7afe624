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

//! The solved-puzzle JSON asset: a map from grid size to the
//! canonical solution strings generated for that size, the one interop
//! format this crate speaks to the outside world.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pipe::Pipe;

/// Canonical solution strings for one or more grid sizes, keyed by `n`.
///
/// Each string is the row-major concatenation of every cell's 4-character
/// pipe encoding, exactly as produced by
/// [`crate::csp::Csp::canonical_string`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolutionSet(pub HashMap<usize, Vec<String>>);

impl SolutionSet {
    pub fn new() -> SolutionSet {
        SolutionSet(HashMap::new())
    }

    /// Records `solutions` for grid size `n`, replacing whatever was there.
    pub fn insert(&mut self, n: usize, solutions: Vec<String>) {
        self.0.insert(n, solutions);
    }

    pub fn get(&self, n: usize) -> Option<&[String]> {
        self.0.get(&n).map(Vec::as_slice)
    }

    /// Validates that every stored solution string actually decodes to `n`
    /// well-formed pipes, without re-running the solver or re-checking the
    /// puzzle constraints (this is a serialization sanity check only).
    pub fn validate_shapes(&self) -> Result<(), Error> {
        for (&n, solutions) in &self.0 {
            for s in solutions {
                if s.len() != 4 * n * n {
                    return Err(Error::MalformedEncoding(s.clone()));
                }
                for chunk in s.as_bytes().chunks(4) {
                    let text = std::str::from_utf8(chunk).map_err(|_| {
                        Error::MalformedEncoding(s.clone())
                    })?;
                    Pipe::decode(text)?;
                }
            }
        }
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(s: &str) -> Result<SolutionSet, Error> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_json() {
        let mut set = SolutionSet::new();
        set.insert(2, vec!["1100".repeat(4)]);
        let json = set.to_json_string().unwrap();
        let back = SolutionSet::from_json_str(&json).unwrap();
        assert_eq!(set, back);
    }

    #[test]
    fn validate_shapes_rejects_wrong_length() {
        let mut set = SolutionSet::new();
        set.insert(2, vec!["110".to_string()]);
        assert!(set.validate_shapes().is_err());
    }

    #[test]
    fn validate_shapes_accepts_well_formed_solution() {
        let mut set = SolutionSet::new();
        let one_cell = "1100";
        set.insert(2, vec![one_cell.repeat(4)]);
        assert!(set.validate_shapes().is_ok());
    }
}
