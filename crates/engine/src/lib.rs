//! Turn engine - selection state machine, turn resolution and snapshots
//!
//! Built on the board and queries in `five-lines-core`. A [`Session`] is the
//! only mutable game object; it takes pointer clicks (or explicit
//! `select`/`move_to` calls) and answers each with a
//! [`TurnResult`](five_lines_types::TurnResult).
//!
//! # Example
//!
//! ```
//! use five_lines_core::{Board, GameConfig, SimpleRng};
//! use five_lines_engine::Session;
//! use five_lines_types::{Color, Coord, Phase};
//!
//! let piece = Coord::new(4, 4);
//! let mut board = Board::default();
//! board.place(piece, Color::Red).unwrap();
//! let mut session = Session::from_board(GameConfig::default(), board, SimpleRng::new(12345)).unwrap();
//!
//! session.click(piece).unwrap();
//! assert_eq!(session.phase(), Phase::Selected(piece));
//!
//! session.click(piece).unwrap();
//! assert_eq!(session.phase(), Phase::Idle);
//! ```

pub mod session;
pub mod snapshot;
mod turn;

pub use five_lines_core as core;
pub use five_lines_types as types;

pub use session::Session;
pub use snapshot::{board_hash, GameSnapshot};
