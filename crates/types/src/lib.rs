//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain values (no references back into the engine), making them
//! usable in any context (core logic, presentation layers, snapshots).
//!
//! # Board Dimensions
//!
//! The reference game is played on a 9x9 square board:
//!
//! - **Rows**: indexed 0-8, top to bottom
//! - **Columns**: indexed 0-8, left to right
//! - Coordinates are written `(row, col)`
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_SIZE` | 9 | Default board width and height |
//! | `DEFAULT_LINE_LENGTH` | 5 | Minimum run length (K) that clears |
//! | `DEFAULT_SPAWN_COUNT` | 3 | Pieces spawned after a non-scoring move (M) |
//! | `DEFAULT_INITIAL_PIECES` | 5 | Pieces placed at session start |
//! | `LINE_BASE_SCORE` | 10 | Points for a clear of exactly K cells |
//! | `LINE_EXTRA_CELL_SCORE` | 5 | Points per cleared cell beyond K |
//! | `CASCADE_CELL_SCORE` | 1 | Points per cell cleared by spawned pieces |
//!
//! # Examples
//!
//! ```
//! use five_lines_types::{Cell, Color, Coord, BOARD_SIZE};
//!
//! let color = Color::from_str("red").unwrap();
//! assert_eq!(color, Color::Red);
//! assert_eq!(color.as_str(), "red");
//!
//! let cell = Cell::Piece(color);
//! assert_eq!(cell.color(), Some(Color::Red));
//! assert!(Cell::Empty.is_empty());
//!
//! let c = Coord::new(4, 4);
//! assert_eq!(c.offset(1, -1), Coord::new(5, 3));
//! assert_eq!(BOARD_SIZE, 9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width and height in cells
pub const BOARD_SIZE: u8 = 9;

/// Largest accepted board dimension
pub const MAX_DIMENSION: u8 = 64;

/// Minimum same-color run length that clears (K)
pub const DEFAULT_LINE_LENGTH: usize = 5;

/// Pieces spawned after a move that did not clear anything (M)
pub const DEFAULT_SPAWN_COUNT: usize = 3;

/// Pieces placed on the board when a session starts or resets
pub const DEFAULT_INITIAL_PIECES: usize = 5;

/// Points for clearing exactly K cells in one batch
pub const LINE_BASE_SCORE: u32 = 10;

/// Points for every cleared cell beyond K in one batch
pub const LINE_EXTRA_CELL_SCORE: u32 = 5;

/// Points per cell removed by a cascade (lines formed by spawned pieces)
pub const CASCADE_CELL_SCORE: u32 = 1;

/// A board coordinate, `(row, col)`.
///
/// Signed so that neighbours of edge cells and caller-supplied garbage can be
/// represented and rejected by range checks instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Coordinate shifted by `(dr, dc)`; saturates instead of overflowing.
    pub fn offset(self, dr: i8, dc: i8) -> Self {
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }

    /// The four orthogonal neighbours (up, down, left, right), unchecked.
    pub fn orthogonal(self) -> [Coord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(self, other: Coord) -> u32 {
        let dr = (self.row as i32 - other.row as i32).unsigned_abs();
        let dc = (self.col as i32 - other.col as i32).unsigned_abs();
        dr + dc
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((row, col): (i8, i8)) -> Self {
        Self { row, col }
    }
}

/// The piece colors
///
/// The palette is fixed; a session may play with any non-empty subset of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Cyan,
}

impl Color {
    /// Every color, in code order
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Cyan,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use five_lines_types::Color;
    ///
    /// assert_eq!(Color::from_str("Red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("cyan"), Some(Color::Cyan));
    /// assert_eq!(Color::from_str("mauve"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            "yellow" => Some(Color::Yellow),
            "purple" => Some(Color::Purple),
            "orange" => Some(Color::Orange),
            "cyan" => Some(Color::Cyan),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Cyan => "cyan",
        }
    }

    /// Stable non-zero code used in snapshots (0 means empty)
    pub fn code(&self) -> u8 {
        match self {
            Color::Red => 1,
            Color::Green => 2,
            Color::Blue => 3,
            Color::Yellow => 4,
            Color::Purple => 5,
            Color::Orange => 6,
            Color::Cyan => 7,
        }
    }

    /// Inverse of [`Color::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        Color::ALL.iter().copied().find(|c| c.code() == code)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell on the game board
///
/// - `Empty`: no piece
/// - `Piece(Color)`: a single colored piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_piece(&self) -> bool {
        matches!(self, Cell::Piece(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Piece(color) => Some(*color),
        }
    }

    /// Snapshot code: 0 for empty, [`Color::code`] otherwise
    pub fn code(&self) -> u8 {
        self.color().map_or(0, |c| c.code())
    }
}

/// The four scan axes for line detection
///
/// Each axis is described by one unit step `(dr, dc)`; scans walk it in both
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along a column: (1, 0)
    Vertical,
    /// Along a row: (0, 1)
    Horizontal,
    /// Top-left to bottom-right: (1, 1)
    Diagonal,
    /// Top-right to bottom-left: (1, -1)
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Vertical,
        Axis::Horizontal,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Unit step `(dr, dc)` along this axis
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Axis::Vertical => (1, 0),
            Axis::Horizontal => (0, 1),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// No empty cell is left after the spawn step
    BoardFull,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::BoardFull => "board_full",
        }
    }
}

/// Which step of a turn removed a batch of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearOrigin {
    /// The moved piece completed one or more lines
    Move,
    /// Freshly spawned pieces completed one or more lines
    Cascade,
}

/// Engine phase as seen by callers
///
/// Turn resolution happens inside a single call, so there is no observable
/// "resolving" phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing selected
    #[default]
    Idle,
    /// A piece is selected and waiting for a destination
    Selected(Coord),
    /// Terminal until reset
    GameOver(GameOverReason),
}

impl Phase {
    pub fn selected(&self) -> Option<Coord> {
        match self {
            Phase::Selected(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }
}

/// One outcome reported by the engine, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A piece moved from `from` to `to` along `path` (inclusive of both ends)
    MoveApplied {
        from: Coord,
        to: Coord,
        path: Vec<Coord>,
    },
    /// A batch of cells was removed
    LinesCleared {
        cells: Vec<Coord>,
        score_delta: u32,
        origin: ClearOrigin,
    },
    /// New pieces were placed after a non-scoring move
    BallsSpawned { pieces: Vec<(Coord, Color)> },
    /// The session entered its terminal phase
    GameOver { reason: GameOverReason },
}

/// Ordered event log of a single engine call
///
/// This is the only channel through which turn outcomes are reported; a
/// presentation layer should apply it as one update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnResult {
    events: Vec<TurnEvent>,
}

impl TurnResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TurnEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TurnEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TurnEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether a move was applied during this call
    pub fn moved(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TurnEvent::MoveApplied { .. }))
    }

    /// Sum of all `LinesCleared` score deltas
    pub fn score_delta(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                TurnEvent::LinesCleared { score_delta, .. } => *score_delta,
                _ => 0,
            })
            .sum()
    }

    /// Every cleared coordinate, in event order
    pub fn cleared_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.events.iter().flat_map(|e| match e {
            TurnEvent::LinesCleared { cells, .. } => cells.as_slice(),
            _ => &[][..],
        })
        .copied()
    }

    /// Pieces spawned during this call
    pub fn spawned(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        self.events.iter().flat_map(|e| match e {
            TurnEvent::BallsSpawned { pieces } => pieces.as_slice(),
            _ => &[][..],
        })
        .copied()
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::GameOver { reason } => Some(*reason),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a TurnResult {
    type Item = &'a TurnEvent;
    type IntoIter = std::slice::Iter<'a, TurnEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
