//! Turn resolution
//!
//! Strict order for one move:
//! 1. move the piece from source to destination
//! 2. clear lines through the destination; if any, the turn ends here
//! 3. spawn up to M pieces on random empty cells, colors from the upcoming queue
//! 4. clear lines through the spawned cells (cascade)
//! 5. game over if the board is full or a requested spawn placed nothing

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use tracing::{debug, info, trace};

use crate::core::{EngineError, LineDetector, MatchSet, Result};
use crate::session::Session;
use crate::types::{ClearOrigin, Color, Coord, GameOverReason, Phase, TurnEvent, TurnResult};

impl<R: RngCore> Session<R> {
    /// Deal the opening position on an empty board.
    ///
    /// Lines formed by chance are removed without score.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        let count = self.config.initial_pieces.min(self.board.size());
        for _ in 0..count {
            let color = *self
                .config
                .palette
                .choose(&mut self.rng)
                .ok_or(EngineError::InvalidConfig {
                    reason: "palette must not be empty",
                })?;
            self.place_random(color)?;
        }

        let swept = LineDetector::new(&self.board, self.config.line_length)?.find_all_matches();
        if !swept.is_empty() {
            debug!(cells = swept.len(), "initial fill formed lines, removed");
            self.remove_all(&swept)?;
        }

        self.refill_upcoming();
        self.check_board_full();
        Ok(())
    }

    /// Resolve a validated move; `path` runs from `src` to `dst` inclusive.
    pub(crate) fn resolve(
        &mut self,
        src: Coord,
        dst: Coord,
        path: Vec<Coord>,
    ) -> Result<TurnResult> {
        let mut result = TurnResult::new();
        self.phase = Phase::Idle;

        let color = self.board.remove(src)?;
        self.board.place(dst, color)?;
        self.turn = self.turn.wrapping_add(1);
        debug!(%src, %dst, hops = path.len().saturating_sub(1), "move applied");
        result.push(TurnEvent::MoveApplied {
            from: src,
            to: dst,
            path,
        });

        let k = self.config.line_length;
        let cleared = LineDetector::new(&self.board, k)?.find_matches(dst)?;
        if !cleared.is_empty() {
            let score_delta = self.config.scoring.line_score(cleared.len(), k);
            self.clear(&cleared, score_delta, ClearOrigin::Move, &mut result)?;
            return Ok(result);
        }

        let spawned = self.spawn()?;
        if !spawned.is_empty() {
            let cascade = LineDetector::new(&self.board, k)?
                .find_matches_from(spawned.iter().map(|&(coord, _)| coord))?;
            result.push(TurnEvent::BallsSpawned {
                pieces: spawned.clone(),
            });
            if !cascade.is_empty() {
                let score_delta = self.config.scoring.cascade_score(cascade.len());
                self.clear(&cascade, score_delta, ClearOrigin::Cascade, &mut result)?;
            }
        }

        let starved = self.config.spawn_count > 0 && spawned.is_empty();
        if self.board.is_full() || starved {
            self.enter_game_over(GameOverReason::BoardFull, &mut result);
        }
        Ok(result)
    }

    /// Place up to `spawn_count` pieces, fewer if the board runs out of room.
    fn spawn(&mut self) -> Result<Vec<(Coord, Color)>> {
        let mut placed = Vec::with_capacity(self.config.spawn_count);
        for _ in 0..self.config.spawn_count {
            if self.board.is_full() {
                break;
            }
            if self.upcoming.is_empty() {
                self.refill_upcoming();
            }
            let Some(color) = self.upcoming.pop() else {
                break;
            };
            let coord = self.place_random(color)?;
            placed.push((coord, color));
        }
        self.refill_upcoming();
        trace!(count = placed.len(), "spawned");
        Ok(placed)
    }

    /// Put `color` on a uniformly chosen empty cell
    fn place_random(&mut self, color: Color) -> Result<Coord> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::inconsistent("no empty cell to place on"));
        }
        let coord = empty[self.rng.random_range(0..empty.len())];
        self.board.place(coord, color)?;
        Ok(coord)
    }

    fn clear(
        &mut self,
        cells: &MatchSet,
        score_delta: u32,
        origin: ClearOrigin,
        result: &mut TurnResult,
    ) -> Result<()> {
        self.remove_all(cells)?;
        self.score = self.score.saturating_add(score_delta);
        debug!(cells = cells.len(), score_delta, ?origin, "lines cleared");
        result.push(TurnEvent::LinesCleared {
            cells: cells.iter().copied().collect(),
            score_delta,
            origin,
        });
        Ok(())
    }

    fn remove_all(&mut self, cells: &MatchSet) -> Result<()> {
        for &coord in cells {
            self.board.remove(coord)?;
        }
        Ok(())
    }

    pub(crate) fn refill_upcoming(&mut self) {
        self.upcoming.refill(&mut self.rng, &self.config.palette);
    }

    /// Enter `GameOver` if no empty cell is left
    pub(crate) fn check_board_full(&mut self) {
        if self.board.is_full() {
            self.phase = Phase::GameOver(GameOverReason::BoardFull);
            info!(score = self.score, "board full at start");
        }
    }

    fn enter_game_over(&mut self, reason: GameOverReason, result: &mut TurnResult) {
        self.phase = Phase::GameOver(reason);
        info!(score = self.score, turn = self.turn, reason = reason.as_str(), "game over");
        result.push(TurnEvent::GameOver { reason });
    }
}
