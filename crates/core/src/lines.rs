//! Line detection - same-color runs of length >= K
//!
//! For an anchor cell, each of the four axes is scanned outward in both
//! directions while cells stay on the board and keep the anchor's color. A run
//! whose total length (anchor included) reaches K contributes all its cells.
//! Runs from different axes are merged, so a cell shared by an L, T or +
//! shape appears once.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::types::{Axis, Color, Coord};

/// Matched coordinates, ordered row-major
pub type MatchSet = BTreeSet<Coord>;

/// Read-only line query over a [`Board`]
#[derive(Debug, Clone, Copy)]
pub struct LineDetector<'a> {
    board: &'a Board,
    line_length: usize,
}

impl<'a> LineDetector<'a> {
    /// Fails for `line_length <= 1`: every single piece would be a line.
    pub fn new(board: &'a Board, line_length: usize) -> Result<Self> {
        if line_length <= 1 {
            return Err(EngineError::InvalidConfig {
                reason: "line length must be at least 2",
            });
        }
        Ok(Self { board, line_length })
    }

    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Every cell in a qualifying run through `anchor`.
    ///
    /// An empty anchor yields an empty set; an out-of-range anchor is an error.
    pub fn find_matches(&self, anchor: Coord) -> Result<MatchSet> {
        let cell = self.board.cell_at(anchor)?;
        let mut matches = MatchSet::new();
        if let Some(color) = cell.color() {
            self.collect_runs(anchor, color, &mut matches);
        }
        Ok(matches)
    }

    /// Union of [`find_matches`](Self::find_matches) over every occupied cell
    pub fn find_all_matches(&self) -> MatchSet {
        let mut matches = MatchSet::new();
        for (coord, color) in self.board.occupied() {
            self.collect_runs(coord, color, &mut matches);
        }
        matches
    }

    /// Union of matches through each of `anchors` (empty anchors ignored)
    pub fn find_matches_from<I>(&self, anchors: I) -> Result<MatchSet>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut matches = MatchSet::new();
        for anchor in anchors {
            matches.extend(self.find_matches(anchor)?);
        }
        Ok(matches)
    }

    /// The maximal same-color run through `anchor` along `axis`, ordered from
    /// the negative end to the positive end. Empty if the anchor is empty or
    /// off the board.
    pub fn run_through(&self, anchor: Coord, axis: Axis) -> Vec<Coord> {
        let Some(color) = self.board.color_at(anchor) else {
            return Vec::new();
        };
        let (dr, dc) = axis.delta();
        let mut backward = self.walk(anchor, color, -dr, -dc);
        backward.reverse();
        backward.push(anchor);
        backward.extend(self.walk(anchor, color, dr, dc));
        backward
    }

    fn collect_runs(&self, anchor: Coord, color: Color, out: &mut MatchSet) {
        let qualifying: ArrayVec<Axis, 4> = Axis::ALL
            .into_iter()
            .filter(|&axis| self.run_len(anchor, color, axis) >= self.line_length)
            .collect();
        for axis in qualifying {
            out.extend(self.run_through(anchor, axis));
        }
    }

    fn run_len(&self, anchor: Coord, color: Color, axis: Axis) -> usize {
        let (dr, dc) = axis.delta();
        1 + self.count(anchor, color, dr, dc) + self.count(anchor, color, -dr, -dc)
    }

    /// Number of consecutive `color` cells after `from` in direction (dr, dc)
    fn count(&self, from: Coord, color: Color, dr: i8, dc: i8) -> usize {
        let mut n = 0;
        let mut at = from.offset(dr, dc);
        while self.board.color_at(at) == Some(color) {
            n += 1;
            at = at.offset(dr, dc);
        }
        n
    }

    fn walk(&self, from: Coord, color: Color, dr: i8, dc: i8) -> Vec<Coord> {
        let mut cells = Vec::new();
        let mut at = from.offset(dr, dc);
        while self.board.color_at(at) == Some(color) {
            cells.push(at);
            at = at.offset(dr, dc);
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_board(cols: &[i8], color: Color) -> Board {
        let mut board = Board::new(9, 9).unwrap();
        for &c in cols {
            board.place(Coord::new(0, c), color).unwrap();
        }
        board
    }

    #[test]
    fn test_rejects_trivial_line_length() {
        let board = Board::new(9, 9).unwrap();
        assert!(LineDetector::new(&board, 0).is_err());
        assert!(LineDetector::new(&board, 1).is_err());
        assert!(LineDetector::new(&board, 2).is_ok());
    }

    #[test]
    fn test_four_is_not_enough() {
        let board = row_board(&[0, 1, 2, 3], Color::Red);
        let d = LineDetector::new(&board, 5).unwrap();
        assert!(d.find_matches(Coord::new(0, 3)).unwrap().is_empty());
        assert!(d.find_all_matches().is_empty());
    }

    #[test]
    fn test_anchor_in_middle_finds_whole_run() {
        let board = row_board(&[2, 3, 4, 5, 6, 7], Color::Blue);
        let d = LineDetector::new(&board, 5).unwrap();
        let m = d.find_matches(Coord::new(0, 4)).unwrap();
        assert_eq!(m.len(), 6);
        assert!(m.contains(&Coord::new(0, 2)));
        assert!(m.contains(&Coord::new(0, 7)));
    }

    #[test]
    fn test_other_color_breaks_run() {
        let mut board = row_board(&[0, 1, 3, 4, 5], Color::Red);
        board.place(Coord::new(0, 2), Color::Green).unwrap();
        let d = LineDetector::new(&board, 5).unwrap();
        assert!(d.find_matches(Coord::new(0, 4)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_anchor_and_out_of_range() {
        let board = Board::new(9, 9).unwrap();
        let d = LineDetector::new(&board, 5).unwrap();
        assert!(d.find_matches(Coord::new(4, 4)).unwrap().is_empty());
        assert!(matches!(
            d.find_matches(Coord::new(9, 0)),
            Err(EngineError::InvalidCoordinate { .. })
        ));
        assert!(d.run_through(Coord::new(-1, 0), Axis::Horizontal).is_empty());
    }

    #[test]
    fn test_run_through_is_ordered() {
        let board = row_board(&[1, 2, 3], Color::Cyan);
        let d = LineDetector::new(&board, 3).unwrap();
        assert_eq!(
            d.run_through(Coord::new(0, 2), Axis::Horizontal),
            vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3)]
        );
        assert_eq!(
            d.run_through(Coord::new(0, 2), Axis::Vertical),
            vec![Coord::new(0, 2)]
        );
    }

    #[test]
    fn test_anti_diagonal() {
        let mut board = Board::new(9, 9).unwrap();
        for i in 0..5 {
            board.place(Coord::new(i, 6 - i), Color::Purple).unwrap();
        }
        let d = LineDetector::new(&board, 5).unwrap();
        let m = d.find_matches(Coord::new(2, 4)).unwrap();
        assert_eq!(m.len(), 5);
        assert!(m.contains(&Coord::new(4, 2)));
    }
}
