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

//! Grid primitives: direction encoding, index <-> (row, col) mapping,
//! boundary-aware neighbor lookup, and the pairwise connection check.

/// One of the four cardinal directions a pipe can open towards.
///
/// The ordering `Up = 0, Right = 1, Down = 2, Left = 3` is part of the
/// external wire format (see [`crate::pipe`]) and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// All four directions in their canonical order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    /// The direction index in `0..4`, matching the canonical ordering.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction you'd be facing from the other side of this one.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Builds a direction back from its canonical index. Panics on an index
    /// outside `0..4`; callers only ever feed this constants they control.
    #[inline]
    pub fn from_index(i: usize) -> Direction {
        match i {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            3 => Direction::Left,
            _ => panic!("direction index out of range: {i}"),
        }
    }
}

/// Sentinel neighbor index meaning "off the grid" (a direction crossing a
/// grid boundary).
pub const OFF_GRID: isize = -1;

/// Returns the neighbor of `i` (a linear index into an `n x n` grid) in each
/// of the four canonical directions, or [`OFF_GRID`] where that neighbor
/// would leave the grid. Uses row/column arithmetic rather than modular
/// wrap-around, so cells at the left/right edges never "neighbor" the
/// opposite edge.
pub fn neighbors(i: usize, n: usize) -> [isize; 4] {
    let row = (i / n) as isize;
    let col = (i % n) as isize;
    let n = n as isize;

    let up = if row > 0 { i as isize - n } else { OFF_GRID };
    let right = if col < n - 1 { i as isize + 1 } else { OFF_GRID };
    let down = if row < n - 1 { i as isize + n } else { OFF_GRID };
    let left = if col > 0 { i as isize - 1 } else { OFF_GRID };

    [up, right, down, left]
}

/// The neighbor of `i` in a single `direction`, or [`OFF_GRID`].
pub fn neighbor(i: usize, n: usize, direction: Direction) -> isize {
    neighbors(i, n)[direction.index()]
}

/// Given a cell's openings and its four neighbors' openings (absent
/// neighbors encoded as `None`), returns which of the cell's sides are
/// *confirmed connections*: both the cell and the neighbor must expose an
/// opening facing each other. A one-sided opening against a closed (or
/// missing) neighbor side is a half-connection and never counts.
pub fn connections(center: [bool; 4], neighbor_openings: [Option<[bool; 4]>; 4]) -> [bool; 4] {
    let mut out = [false; 4];
    for d in 0..4 {
        out[d] = center[d]
            && neighbor_openings[d]
                .map(|n| n[Direction::from_index(d).opposite().index()])
                .unwrap_or(false);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_neighbors_are_off_grid() {
        // top-left corner of a 3x3 grid
        let ns = neighbors(0, 3);
        assert_eq!(ns[Direction::Up.index()], OFF_GRID);
        assert_eq!(ns[Direction::Left.index()], OFF_GRID);
        assert_eq!(ns[Direction::Right.index()], 1);
        assert_eq!(ns[Direction::Down.index()], 3);
    }

    #[test]
    fn no_wraparound_at_row_boundary() {
        // rightmost cell of row 0 in a 3x3 grid must not "wrap" to col 0
        let ns = neighbors(2, 3);
        assert_eq!(ns[Direction::Right.index()], OFF_GRID);
    }

    #[test]
    fn opposite_is_involutive() {
        for d in ALL_DIRECTIONS {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn connections_require_mutual_opening() {
        // center opens right, neighbor to the right opens left: connects.
        let center = [false, true, false, false];
        let right_neighbor = [false, false, false, true];
        let neighbor_openings = [None, Some(right_neighbor), None, None];
        let out = connections(center, neighbor_openings);
        assert!(out[Direction::Right.index()]);
    }

    #[test]
    fn half_connection_is_not_a_connection() {
        // center opens right, but neighbor does not open left: half-connection.
        let center = [false, true, false, false];
        let right_neighbor = [false, false, false, false];
        let neighbor_openings = [None, Some(right_neighbor), None, None];
        let out = connections(center, neighbor_openings);
        assert!(!out[Direction::Right.index()]);
    }

    #[test]
    fn missing_neighbor_never_connects() {
        let center = [true, true, true, true];
        let out = connections(center, [None, None, None, None]);
        assert_eq!(out, [false, false, false, false]);
    }
}
