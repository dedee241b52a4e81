//! Engine error taxonomy.
//!
//! `InvalidCoordinate`, `IllegalMove` and `OperationAfterGameOver` are ordinary
//! rejected-input results. `InconsistentState` means the board's bookkeeping
//! diverged from its grid; the engine treats it as fatal for the session.

use derive_more::{Display, Error};

use crate::types::Coord;

/// Why a move (or a board mutation backing it) was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IllegalMoveReason {
    /// The source cell holds no piece
    #[display("source cell is empty")]
    SourceEmpty,
    /// The destination cell already holds a piece
    #[display("destination cell is occupied")]
    DestinationOccupied,
    /// No path of empty cells connects source and destination
    #[display("destination is not reachable")]
    Unreachable,
    /// A destination was given while nothing was selected
    #[display("no piece is selected")]
    NoSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("coordinate {coord} is outside the {width}x{height} board")]
    InvalidCoordinate { coord: Coord, width: u8, height: u8 },

    #[display("illegal move at {coord}: {reason}")]
    IllegalMove {
        coord: Coord,
        reason: IllegalMoveReason,
    },

    #[display("the game is over; reset to play again")]
    OperationAfterGameOver,

    #[display("inconsistent board state: {detail}")]
    InconsistentState { detail: String },

    #[display("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl EngineError {
    pub fn illegal(coord: Coord, reason: IllegalMoveReason) -> Self {
        Self::IllegalMove { coord, reason }
    }

    pub fn inconsistent(detail: impl Into<String>) -> Self {
        Self::InconsistentState {
            detail: detail.into(),
        }
    }

    /// Expected, recoverable rejections (as opposed to engine defects).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::InconsistentState { .. })
    }

    /// The refusal reason, when this is an `IllegalMove`
    pub fn illegal_reason(&self) -> Option<IllegalMoveReason> {
        match self {
            EngineError::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
