//! Five Lines (workspace facade crate).
//!
//! Re-exports the member crates under `five_lines::{core,engine,types}` and
//! hosts the seeded autoplay driver used by the `five-lines` binary.

pub mod autoplay;

pub use five_lines_core as core;
pub use five_lines_engine as engine;
pub use five_lines_types as types;
