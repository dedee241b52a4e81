//! Core game logic - pure, deterministic, and testable
//!
//! The board and the two read-only queries the turn engine is built on. Nothing
//! here does I/O or knows about a front-end.
//!
//! # Module Structure
//!
//! - [`board`]: width x height grid with an incrementally tracked empty set
//! - [`reach`]: breadth-first reachability through empty cells
//! - [`lines`]: same-color run detection along the four axes
//! - [`scoring`]: points for move clears and cascade clears
//! - [`config`]: session configuration and validation
//! - [`rng`]: seeded generator and the upcoming-color queue
//! - [`error`]: the engine error taxonomy
//!
//! # Example
//!
//! ```
//! use five_lines_core::{Board, LineDetector, ReachabilityChecker};
//! use five_lines_types::{Color, Coord};
//!
//! let mut board = Board::new(9, 9).unwrap();
//! for col in 0..5 {
//!     board.place(Coord::new(0, col), Color::Red).unwrap();
//! }
//!
//! let lines = LineDetector::new(&board, 5).unwrap();
//! assert_eq!(lines.find_matches(Coord::new(0, 2)).unwrap().len(), 5);
//!
//! let reach = ReachabilityChecker::new(&board);
//! assert!(reach.can_reach(Coord::new(0, 0), Coord::new(8, 8)));
//! assert!(!reach.can_reach(Coord::new(8, 8), Coord::new(0, 4)));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod lines;
pub mod reach;
pub mod rng;
pub mod scoring;

pub use five_lines_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{EngineError, IllegalMoveReason, Result};
pub use lines::{LineDetector, MatchSet};
pub use reach::ReachabilityChecker;
pub use rng::{SimpleRng, UpcomingColors};
pub use scoring::{calculate_line_score, ScoreRules};
