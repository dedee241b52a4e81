//! Seeded autoplay - plays random legal moves until the game ends
//!
//! Moves come from a generator separate from the session's, so the same
//! `(session seed, driver seed)` pair always replays the same game.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::core::{ReachabilityChecker, Result};
use crate::engine::Session;
use crate::types::{Coord, GameOverReason, Phase, TurnEvent};

/// Random pairs tried before falling back to an exhaustive scan
const RANDOM_ATTEMPTS: usize = 64;

/// Why an autoplay run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    GameOver(GameOverReason),
    /// No piece can reach any empty cell
    NoLegalMove,
    TurnLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::GameOver(reason) => reason.as_str(),
            StopReason::NoLegalMove => "no_legal_move",
            StopReason::TurnLimit => "turn_limit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplaySummary {
    pub turns: u32,
    pub score: u32,
    pub lines_cleared: u32,
    pub cells_cleared: usize,
    pub stop: StopReason,
}

/// Drives a session with random legal moves
#[derive(Debug)]
pub struct Autoplay {
    rng: StdRng,
    max_turns: Option<u32>,
}

impl Autoplay {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_turns: None,
        }
    }

    pub fn with_max_turns(mut self, max_turns: Option<u32>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// A random `(source, destination)` pair the session would accept
    pub fn pick_move<R: RngCore>(&mut self, session: &Session<R>) -> Option<(Coord, Coord)> {
        let board = session.board();
        let sources: Vec<Coord> = board.occupied().map(|(c, _)| c).collect();
        let targets = board.empty_cells();
        let reach = ReachabilityChecker::new(board);

        for _ in 0..RANDOM_ATTEMPTS {
            let (Some(&src), Some(&dst)) = (
                sources.choose(&mut self.rng),
                targets.choose(&mut self.rng),
            ) else {
                return None;
            };
            if reach.can_reach(src, dst) {
                return Some((src, dst));
            }
        }

        // Sparse connectivity: scan everything before giving up
        sources
            .iter()
            .flat_map(|&src| targets.iter().map(move |&dst| (src, dst)))
            .find(|&(src, dst)| reach.can_reach(src, dst))
    }

    /// Play until game over, a stuck board, or the turn limit.
    pub fn run<R: RngCore>(&mut self, session: &mut Session<R>) -> Result<AutoplaySummary> {
        let mut lines_cleared = 0u32;
        let mut cells_cleared = 0usize;

        let stop = loop {
            if let Phase::GameOver(reason) = session.phase() {
                break StopReason::GameOver(reason);
            }
            if self.max_turns.is_some_and(|max| session.turn() >= max) {
                break StopReason::TurnLimit;
            }
            let Some((src, dst)) = self.pick_move(session) else {
                break StopReason::NoLegalMove;
            };

            if session.selected() != Some(src) {
                session.click(src)?;
            }
            let result = session.click(dst)?;
            for event in &result {
                if let TurnEvent::LinesCleared { cells, .. } = event {
                    lines_cleared += 1;
                    cells_cleared += cells.len();
                }
            }
            debug!(turn = session.turn(), %src, %dst, score = session.score(), "autoplay move");
        };

        info!(
            turns = session.turn(),
            score = session.score(),
            stop = stop.as_str(),
            "autoplay finished"
        );
        Ok(AutoplaySummary {
            turns: session.turn(),
            score: session.score(),
            lines_cleared,
            cells_cleared,
            stop,
        })
    }
}
