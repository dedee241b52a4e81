//! Board module - manages the game grid
//!
//! The board is a `width` x `height` grid where each cell is empty or holds one
//! colored piece. Cells live in a flat row-major vector (`row * width + col`).
//!
//! Alongside the grid the board tracks the set of empty coordinates so that
//! spawning can pick a random empty cell in O(1):
//! - `empty` is a dense list of the empty coordinates,
//! - `slots[idx]` is the position of cell `idx` inside `empty` (None if occupied).
//!
//! `place` and `remove` update both structures in the same call. If the two
//! ever disagree the call fails with `InconsistentState` before mutating
//! anything.

use tracing::trace;

use crate::error::{EngineError, IllegalMoveReason, Result};
use crate::types::{Cell, Color, Coord, BOARD_SIZE, MAX_DIMENSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order
    cells: Vec<Cell>,
    /// Dense list of empty coordinates
    empty: Vec<Coord>,
    /// Position of each cell in `empty`
    slots: Vec<Option<usize>>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Both dimensions must lie in `1..=MAX_DIMENSION` so every cell has an
    /// `i8` coordinate.
    pub fn new(width: u8, height: u8) -> Result<Self> {
        let dims = 1..=MAX_DIMENSION;
        if !dims.contains(&width) || !dims.contains(&height) {
            return Err(EngineError::InvalidConfig {
                reason: "board dimensions must be between 1 and 64",
            });
        }
        Ok(Self::blank(width, height))
    }

    fn blank(width: u8, height: u8) -> Self {
        let size = width as usize * height as usize;
        let mut board = Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
            empty: Vec::with_capacity(size),
            slots: vec![None; size],
        };
        board.rebuild_empty();
        board
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.row as usize * self.width as usize + coord.col as usize)
    }

    fn coord_of(&self, idx: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((idx / w) as i8, (idx % w) as i8)
    }

    fn checked_index(&self, coord: Coord) -> Result<usize> {
        self.index(coord).ok_or(EngineError::InvalidCoordinate {
            coord,
            width: self.width,
            height: self.height,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Check if the coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as u8) < self.height
            && (coord.col as u8) < self.width
    }

    /// Cell content at `coord`; out of range is an error
    pub fn cell_at(&self, coord: Coord) -> Result<Cell> {
        let idx = self.checked_index(coord)?;
        Ok(self.cells[idx])
    }

    /// Cell content at `coord`, or None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Color of the piece at `coord` (None if empty or out of bounds)
    pub fn color_at(&self, coord: Coord) -> Option<Color> {
        self.get(coord).and_then(|c| c.color())
    }

    /// In bounds and empty
    pub fn is_empty_cell(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// In bounds and holding a piece
    pub fn is_occupied(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Piece(_)))
    }

    /// Put a piece of `color` on an empty cell
    pub fn place(&mut self, coord: Coord, color: Color) -> Result<()> {
        let idx = self.checked_index(coord)?;
        if self.cells[idx].is_piece() {
            return Err(EngineError::illegal(
                coord,
                IllegalMoveReason::DestinationOccupied,
            ));
        }
        let slot = self.slots[idx]
            .filter(|&s| self.empty.get(s) == Some(&coord))
            .ok_or_else(|| {
                EngineError::inconsistent(format!("empty cell {coord} is not tracked as empty"))
            })?;

        self.cells[idx] = Cell::Piece(color);
        self.slots[idx] = None;
        self.empty.swap_remove(slot);
        if let Some(&moved) = self.empty.get(slot) {
            // `moved` took the vacated position in the dense list
            let moved_idx = moved.row as usize * self.width as usize + moved.col as usize;
            self.slots[moved_idx] = Some(slot);
        }
        trace!(%coord, %color, "placed");
        Ok(())
    }

    /// Take the piece off an occupied cell, returning its color
    pub fn remove(&mut self, coord: Coord) -> Result<Color> {
        let idx = self.checked_index(coord)?;
        let Cell::Piece(color) = self.cells[idx] else {
            return Err(EngineError::illegal(coord, IllegalMoveReason::SourceEmpty));
        };
        if self.slots[idx].is_some() {
            return Err(EngineError::inconsistent(format!(
                "occupied cell {coord} is tracked as empty"
            )));
        }

        self.cells[idx] = Cell::Empty;
        self.slots[idx] = Some(self.empty.len());
        self.empty.push(coord);
        trace!(%coord, %color, "removed");
        Ok(color)
    }

    /// Current empty coordinates (order is unspecified but deterministic)
    pub fn empty_cells(&self) -> &[Coord] {
        &self.empty
    }

    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_piece()).count()
    }

    /// True iff there is no empty cell left
    pub fn is_full(&self) -> bool {
        self.empty.is_empty()
    }

    /// Every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells.len()).map(move |idx| self.coord_of(idx))
    }

    /// Occupied coordinates with their colors, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.color().map(|c| (self.coord_of(idx), c)))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.rebuild_empty();
    }

    fn rebuild_empty(&mut self) {
        self.empty.clear();
        for idx in 0..self.cells.len() {
            if self.cells[idx].is_empty() {
                self.slots[idx] = Some(self.empty.len());
                self.empty.push(self.coord_of(idx));
            } else {
                self.slots[idx] = None;
            }
        }
    }

    /// Full-scan audit of the tracked empty set against the grid
    pub fn check_consistency(&self) -> Result<()> {
        let mut tracked = 0usize;
        for (idx, cell) in self.cells.iter().enumerate() {
            let coord = self.coord_of(idx);
            match (cell, self.slots[idx]) {
                (Cell::Empty, Some(slot)) if self.empty.get(slot) == Some(&coord) => tracked += 1,
                (Cell::Piece(_), None) => {}
                _ => {
                    return Err(EngineError::inconsistent(format!(
                        "cell {coord} disagrees with the empty set"
                    )))
                }
            }
        }
        if tracked != self.empty.len() {
            return Err(EngineError::inconsistent(format!(
                "{} empty coordinates tracked, {tracked} empty cells on the grid",
                self.empty.len()
            )));
        }
        Ok(())
    }

    /// Build a board from rows of snapshot codes (0 = empty), for tests and tools
    pub fn from_codes(rows: &[&[u8]]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let (Ok(w), Ok(h)) = (u8::try_from(width), u8::try_from(height)) else {
            return Err(EngineError::InvalidConfig {
                reason: "board dimensions must be between 1 and 64",
            });
        };
        let mut board = Self::new(w, h)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::InvalidConfig {
                    reason: "rows must all have the same length",
                });
            }
            for (c, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let color = Color::from_code(code).ok_or(EngineError::InvalidConfig {
                    reason: "unknown color code",
                })?;
                board.place(Coord::new(r as i8, c as i8), color)?;
            }
        }
        Ok(board)
    }

    /// Rows of snapshot codes (0 = empty)
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(Cell::code).collect())
            .collect()
    }

    /// Overwrite the tracked slot of `coord` without touching the grid
    #[cfg(any(test, feature = "test-util"))]
    pub fn corrupt_slot(&mut self, coord: Coord, slot: Option<usize>) {
        if let Some(idx) = self.index(coord) {
            self.slots[idx] = slot;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::blank(BOARD_SIZE, BOARD_SIZE)
    }
}
