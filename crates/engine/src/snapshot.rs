//! Presentation snapshot of a session
//!
//! Cells are written as color codes (0 = empty, 1..=7 per [`Color::code`]).
//! `board_hash` is a 64-bit FNV-1a over the codes in row-major order, kept
//! stable so a front-end can skip redraws when it does not change.

use serde::Serialize;

use crate::types::{Cell, Color, Coord, Phase};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

/// FNV-1a 64-bit over a stream of cell codes
pub fn board_hash(codes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h = FNV_OFFSET;
    for b in codes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Rows of color codes, top to bottom
    pub cells: Vec<Vec<u8>>,
    pub board_hash: u64,
    pub score: u32,
    pub turn: u32,
    pub phase: Phase,
    pub selected: Option<Coord>,
    pub upcoming: Vec<Color>,
    pub game_over: bool,
    pub faulted: bool,
}

impl GameSnapshot {
    /// Overwrite the grid from row-major `cells`, reusing row buffers.
    pub(crate) fn write_cells(&mut self, cells: &[Cell]) {
        let width = self.width.max(1) as usize;
        let rows = cells.len() / width;
        self.cells.resize_with(rows, Vec::new);
        for (row, chunk) in self.cells.iter_mut().zip(cells.chunks(width)) {
            row.clear();
            row.extend(chunk.iter().map(Cell::code));
        }
        self.board_hash = board_hash(cells.iter().map(Cell::code));
    }

    /// Code at `coord`, if on the board
    pub fn code_at(&self, coord: Coord) -> Option<u8> {
        if coord.row < 0 || coord.col < 0 {
            return None;
        }
        self.cells
            .get(coord.row as usize)?
            .get(coord.col as usize)
            .copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c != 0).count()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.faulted
    }
}
