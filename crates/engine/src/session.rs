//! Session - the click-driven state machine around one board
//!
//! A session owns its board, its generator and its score. Inputs arrive one at
//! a time; a move is resolved completely (move, clear, spawn, cascade, game
//! over check) before the call returns, and everything that happened is
//! reported in the returned [`TurnResult`].
//!
//! Phases: `Idle -> Selected(cell) -> Idle`, with `GameOver` terminal until
//! [`Session::reset`]. A board bookkeeping failure faults the session: every
//! later input returns that same error until reset.

use rand::RngCore;
use tracing::{debug, error, info, instrument};

use crate::core::{
    Board, EngineError, GameConfig, IllegalMoveReason, ReachabilityChecker, Result, SimpleRng,
    UpcomingColors,
};
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, Color, Coord, Phase, TurnResult};

#[derive(Debug, Clone)]
pub struct Session<R: RngCore = SimpleRng> {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) rng: R,
    pub(crate) upcoming: UpcomingColors,
    pub(crate) phase: Phase,
    pub(crate) score: u32,
    /// Moves applied since the last reset
    pub(crate) turn: u32,
    pub(crate) fault: Option<EngineError>,
}

impl Session<SimpleRng> {
    /// Session driven by the built-in deterministic generator
    pub fn with_seed(config: GameConfig, seed: u32) -> Result<Self> {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: RngCore> Session<R> {
    /// Validate `config` and start a game: initial pieces are placed and the
    /// upcoming queue is filled.
    pub fn new(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let mut session = Self::blank(config, rng)?;
        session.start_game()?;
        Ok(session)
    }

    /// Start from an existing position instead of a random initial fill.
    ///
    /// The board must match the configured dimensions and pass the
    /// consistency audit. A full board starts in `GameOver`.
    pub fn from_board(config: GameConfig, board: Board, rng: R) -> Result<Self> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(EngineError::InvalidConfig {
                reason: "board dimensions do not match the configuration",
            });
        }
        board.check_consistency()?;

        let mut session = Self::blank(config, rng)?;
        session.board = board;
        session.refill_upcoming();
        session.check_board_full();
        Ok(session)
    }

    fn blank(config: GameConfig, rng: R) -> Result<Self> {
        let board = Board::new(config.width, config.height)?;
        let upcoming = UpcomingColors::new(config.spawn_count);
        Ok(Self {
            config,
            board,
            rng,
            upcoming,
            phase: Phase::Idle,
            score: 0,
            turn: 0,
            fault: None,
        })
    }

    /// Clear everything and deal a fresh game from the current generator
    /// state. Also clears a fault.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) -> Result<()> {
        self.board.reset();
        self.upcoming.clear();
        self.phase = Phase::Idle;
        self.score = 0;
        self.turn = 0;
        self.fault = None;
        let started = self.start_game();
        self.record_fault(started)?;
        info!(score = self.score, "session reset");
        Ok(())
    }

    /// Change or clear the selection. Never moves a piece.
    ///
    /// - Idle + empty cell: nothing happens
    /// - any phase + occupied cell: that cell becomes selected, or the
    ///   selection is cleared if it already was
    /// - Selected + empty cell: the selection is kept
    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, coord: Coord) -> Result<TurnResult> {
        self.ensure_playable()?;
        let cell = self.board.cell_at(coord)?;

        match (self.phase, cell) {
            (Phase::Selected(current), Cell::Piece(_)) if current == coord => {
                debug!(%coord, "selection cleared");
                self.phase = Phase::Idle;
            }
            (Phase::Idle | Phase::Selected(_), Cell::Piece(color)) => {
                debug!(%coord, %color, "selected");
                self.phase = Phase::Selected(coord);
            }
            _ => {}
        }
        Ok(TurnResult::new())
    }

    /// Move the selected piece to `dst` and resolve the turn.
    ///
    /// Without a selection this is `IllegalMove(NoSelection)`. An unreachable
    /// destination drops the selection and returns `IllegalMove(Unreachable)`
    /// with the board untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn move_to(&mut self, dst: Coord) -> Result<TurnResult> {
        self.ensure_playable()?;
        let cell = self.board.cell_at(dst)?;
        let Some(src) = self.phase.selected() else {
            return Err(EngineError::illegal(dst, IllegalMoveReason::NoSelection));
        };
        if cell.is_piece() {
            return Err(EngineError::illegal(
                dst,
                IllegalMoveReason::DestinationOccupied,
            ));
        }

        let Some(path) = ReachabilityChecker::new(&self.board).find_path(src, dst) else {
            debug!(%src, %dst, "unreachable, selection dropped");
            self.phase = Phase::Idle;
            return Err(EngineError::illegal(dst, IllegalMoveReason::Unreachable));
        };

        let resolved = self.resolve(src, dst, path);
        self.record_fault(resolved)
    }

    /// Single entry point for a pointer click.
    ///
    /// A click on an empty cell while a piece is selected is a move attempt;
    /// every other click is a selection change.
    pub fn click(&mut self, coord: Coord) -> Result<TurnResult> {
        self.ensure_playable()?;
        let cell = self.board.cell_at(coord)?;
        match (self.phase, cell) {
            (Phase::Selected(_), Cell::Empty) => self.move_to(coord),
            _ => self.select(coord),
        }
    }

    fn ensure_playable(&self) -> Result<()> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if self.phase.is_game_over() {
            return Err(EngineError::OperationAfterGameOver);
        }
        Ok(())
    }

    /// Faults the session on `InconsistentState`; other results pass through.
    fn record_fault<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if !err.is_recoverable() {
                error!(error = %err, turn = self.turn, "board bookkeeping diverged, session faulted");
                self.phase = Phase::Idle;
                self.fault = Some(err.clone());
            }
        }
        result
    }

    pub fn cell_at(&self, coord: Coord) -> Result<Cell> {
        self.board.cell_at(coord)
    }

    pub fn empty_cells(&self) -> &[Coord] {
        self.board.empty_cells()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Coord> {
        self.phase.selected()
    }

    /// Colors the next spawn step will use, front first
    pub fn upcoming(&self) -> Vec<Color> {
        self.upcoming.to_vec()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<&EngineError> {
        self.fault.as_ref()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.write_cells(self.board.cells());
        out.score = self.score;
        out.turn = self.turn;
        out.phase = self.phase;
        out.selected = self.phase.selected();
        out.upcoming.clear();
        out.upcoming.extend(self.upcoming.iter());
        out.game_over = self.phase.is_game_over();
        out.faulted = self.fault.is_some();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
