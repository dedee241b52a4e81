//! Scoring module - points awarded for cleared batches
//!
//! A batch is every cell removed by one clear step of a turn (merged across
//! axes). Two policies exist:
//! - Move clears: a fixed base for exactly K cells plus a fixed increment for
//!   every cell beyond K.
//! - Cascade clears (lines completed by spawned pieces): a flat bonus per
//!   cleared cell, applied to every cascade the same way.

use crate::types::{CASCADE_CELL_SCORE, LINE_BASE_SCORE, LINE_EXTRA_CELL_SCORE};

/// Score table for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    /// Points for clearing exactly K cells
    pub line_base: u32,
    /// Points for each cell beyond K in the same batch
    pub per_extra_cell: u32,
    /// Points for each cell cleared by a cascade
    pub cascade_per_cell: u32,
}

impl ScoreRules {
    pub const fn new(line_base: u32, per_extra_cell: u32, cascade_per_cell: u32) -> Self {
        Self {
            line_base,
            per_extra_cell,
            cascade_per_cell,
        }
    }

    /// No points for cascades
    pub const fn without_cascade_bonus(self) -> Self {
        Self {
            cascade_per_cell: 0,
            ..self
        }
    }

    /// Score for a batch of `cells` cleared by the player's move
    pub fn line_score(&self, cells: usize, line_length: usize) -> u32 {
        calculate_line_score(cells, line_length, self.line_base, self.per_extra_cell)
    }

    /// Score for a batch of `cells` cleared by spawned pieces
    pub fn cascade_score(&self, cells: usize) -> u32 {
        (cells as u32).saturating_mul(self.cascade_per_cell)
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::new(LINE_BASE_SCORE, LINE_EXTRA_CELL_SCORE, CASCADE_CELL_SCORE)
    }
}

/// Calculate the score of one cleared batch.
///
/// Returns 0 below `line_length`; non-decreasing in `cells`.
pub fn calculate_line_score(cells: usize, line_length: usize, base: u32, per_extra: u32) -> u32 {
    if cells < line_length {
        return 0;
    }
    let extra = (cells - line_length) as u32;
    base.saturating_add(extra.saturating_mul(per_extra))
}
