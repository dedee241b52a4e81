//! Session configuration
//!
//! `GameConfig::default()` is the reference game: a 9x9 board, all seven
//! colors, lines of five, three pieces per spawn and five to start with.

use crate::error::{EngineError, Result};
use crate::scoring::ScoreRules;
use crate::types::{
    Color, BOARD_SIZE, DEFAULT_INITIAL_PIECES, DEFAULT_LINE_LENGTH, DEFAULT_SPAWN_COUNT,
    MAX_DIMENSION,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Colors spawned pieces are drawn from
    pub palette: Vec<Color>,
    /// Minimum run length that clears (K)
    pub line_length: usize,
    /// Pieces spawned after a non-scoring move (M)
    pub spawn_count: usize,
    /// Pieces placed at session start and on reset
    pub initial_pieces: usize,
    pub scoring: ScoreRules,
}

impl GameConfig {
    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_palette(mut self, palette: impl Into<Vec<Color>>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_spawn_count(mut self, spawn_count: usize) -> Self {
        self.spawn_count = spawn_count;
        self
    }

    pub fn with_initial_pieces(mut self, initial_pieces: usize) -> Self {
        self.initial_pieces = initial_pieces;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoreRules) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject configurations the engine cannot play.
    pub fn validate(&self) -> Result<()> {
        let dims = 1..=MAX_DIMENSION;
        if !dims.contains(&self.width) || !dims.contains(&self.height) {
            return Err(EngineError::InvalidConfig {
                reason: "board dimensions must be between 1 and 64",
            });
        }
        if self.line_length <= 1 {
            return Err(EngineError::InvalidConfig {
                reason: "line length must be at least 2",
            });
        }
        if self.palette.is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "palette must not be empty",
            });
        }
        for (i, color) in self.palette.iter().enumerate() {
            if self.palette[..i].contains(color) {
                return Err(EngineError::InvalidConfig {
                    reason: "palette contains a duplicate color",
                });
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_SIZE,
            height: BOARD_SIZE,
            palette: Color::ALL.to_vec(),
            line_length: DEFAULT_LINE_LENGTH,
            spawn_count: DEFAULT_SPAWN_COUNT,
            initial_pieces: DEFAULT_INITIAL_PIECES,
            scoring: ScoreRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_game() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (9, 9));
        assert_eq!(config.palette.len(), 7);
        assert_eq!(config.line_length, 5);
        assert_eq!(config.spawn_count, 3);
        assert_eq!(config.cell_count(), 81);
        config.validate().unwrap();
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::default()
            .with_size(6, 4)
            .with_palette([Color::Red, Color::Blue])
            .with_line_length(3)
            .with_spawn_count(2)
            .with_initial_pieces(0);
        assert_eq!(config.cell_count(), 24);
        assert_eq!(config.palette, vec![Color::Red, Color::Blue]);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            GameConfig::default().with_size(0, 9),
            GameConfig::default().with_size(9, 65),
            GameConfig::default().with_line_length(1),
            GameConfig::default().with_palette(Vec::new()),
            GameConfig::default().with_palette([Color::Red, Color::Green, Color::Red]),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(EngineError::InvalidConfig { .. })),
                "{config:?} should be rejected"
            );
        }
    }
}
