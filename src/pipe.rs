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

//! The `Pipe` opening vector, the base enumeration of the 14 legal shapes,
//! and the per-cell domain builder.

use crate::error::Error;
use crate::grid::{neighbors, Direction, ALL_DIRECTIONS, OFF_GRID};

/// A pipe's opening vector: `openings[d]` is true iff the pipe exposes an
/// opening on side `d` (indexed by [`Direction::index`]).
///
/// Invariant: a `Pipe` never has 0 or 4 openings - those two configurations
/// are rotation-invariant and are excluded from every domain built by this
/// module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pipe {
    openings: [bool; 4],
}

impl Pipe {
    /// Builds a pipe from an explicit opening vector. Does not itself check
    /// the "never 0 or 4 openings" invariant - that is enforced by the
    /// domain builder, which is the only place new `Pipe` values should
    /// normally be manufactured from scratch; decoding also goes through
    /// here, see [`Pipe::decode`].
    pub fn new(openings: [bool; 4]) -> Pipe {
        Pipe { openings }
    }

    /// Whether this pipe opens towards `d`.
    #[inline]
    pub fn opens(self, d: Direction) -> bool {
        self.openings[d.index()]
    }

    /// The full opening vector, in canonical direction order.
    #[inline]
    pub fn openings(self) -> [bool; 4] {
        self.openings
    }

    /// Number of open sides (1, 2, or 3 for any pipe produced by this crate).
    pub fn degree(self) -> usize {
        self.openings.iter().filter(|o| **o).count()
    }

    /// Encodes this pipe as four '0'/'1' characters in direction order
    /// Up, Right, Down, Left - the canonical wire format.
    pub fn encode(self) -> String {
        self.openings
            .iter()
            .map(|o| if *o { '1' } else { '0' })
            .collect()
    }

    /// Decodes a single pipe from its four-character canonical encoding.
    pub fn decode(s: &str) -> Result<Pipe, Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 || !chars.iter().all(|c| *c == '0' || *c == '1') {
            return Err(Error::MalformedEncoding(s.to_string()));
        }
        let mut openings = [false; 4];
        for (i, c) in chars.iter().enumerate() {
            openings[i] = *c == '1';
        }
        Ok(Pipe { openings })
    }
}

/// The 16 boolean^4 opening vectors in the fixed enumeration order, with the
/// all-false (0000) and all-true (1111) vectors already excluded - this is
/// the 14-element "base set" every cell's domain is filtered down from.
///
/// ```text
/// 1110 1101 1100 1011 1010 1001 1000
/// 0111 0110 0101 0100 0011 0010 0001
/// ```
pub fn base_pipes() -> Vec<Pipe> {
    const ORDER: [[bool; 4]; 14] = [
        [true, true, true, false],
        [true, true, false, true],
        [true, true, false, false],
        [true, false, true, true],
        [true, false, true, false],
        [true, false, false, true],
        [true, false, false, false],
        [false, true, true, true],
        [false, true, true, false],
        [false, true, false, true],
        [false, true, false, false],
        [false, false, true, true],
        [false, false, true, false],
        [false, false, false, true],
    ];
    ORDER.iter().map(|o| Pipe::new(*o)).collect()
}

/// Builds the legal domain for the cell at linear index `i` on an `n x n`
/// grid: the 14-pipe base set, filtered to drop any pipe that would open
/// past a grid edge. Iteration order of the base set is
/// preserved, which is what callers rely on for deterministic solving.
pub fn cell_domain(i: usize, n: usize) -> Vec<Pipe> {
    let ns = neighbors(i, n);
    base_pipes()
        .into_iter()
        .filter(|p| {
            ALL_DIRECTIONS
                .iter()
                .all(|d| !(p.opens(*d) && ns[d.index()] == OFF_GRID))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_pipes_excludes_isolated_and_all_open() {
        let base = base_pipes();
        assert_eq!(base.len(), 14);
        assert!(base.iter().all(|p| p.degree() >= 1 && p.degree() <= 3));
    }

    #[test]
    fn base_pipes_enumeration_order_is_fixed() {
        let base = base_pipes();
        assert_eq!(base[0].encode(), "1110");
        assert_eq!(base[6].encode(), "1000");
        assert_eq!(base[7].encode(), "0111");
        assert_eq!(base[13].encode(), "0001");
    }

    #[test]
    fn encode_decode_roundtrip() {
        for p in base_pipes() {
            let s = p.encode();
            let back = Pipe::decode(&s).unwrap();
            assert_eq!(p, back);
        }
    }

    #[test]
    fn decode_rejects_malformed_strings() {
        assert!(Pipe::decode("101").is_err());
        assert!(Pipe::decode("10102").is_err());
        assert!(Pipe::decode("12ab").is_err());
    }

    #[test]
    fn corner_domain_has_at_most_three_pipes() {
        // top-left corner of a 4x4 grid: Up and Left are forbidden.
        let dom = cell_domain(0, 4);
        assert!(dom.len() <= 3);
        assert!(dom
            .iter()
            .all(|p| !p.opens(Direction::Up) && !p.opens(Direction::Left)));
    }

    #[test]
    fn edge_cell_never_opens_off_grid() {
        for n in 2..=5 {
            for i in 0..(n * n) {
                let ns = neighbors(i, n);
                for p in cell_domain(i, n) {
                    for d in ALL_DIRECTIONS {
                        if ns[d.index()] == OFF_GRID {
                            assert!(!p.opens(d));
                        }
                    }
                }
            }
        }
    }

    proptest::proptest! {
        #[test]
        fn encode_decode_roundtrips_over_any_legal_opening_vector(
            idx in 0usize..14,
        ) {
            let p = base_pipes()[idx];
            let back = Pipe::decode(&p.encode()).unwrap();
            assert_eq!(p, back);
        }

        #[test]
        fn cell_domain_never_opens_off_grid_for_any_n_and_cell(
            n in 2usize..=8,
            cell in 0usize..64,
        ) {
            proptest::prop_assume!(cell < n * n);
            let ns = neighbors(cell, n);
            for p in cell_domain(cell, n) {
                for d in ALL_DIRECTIONS {
                    if ns[d.index()] == OFF_GRID {
                        assert!(!p.opens(d));
                    }
                }
            }
        }
    }
}
