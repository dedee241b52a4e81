//! Session tests - click state machine and full turn resolution

use five_lines::autoplay::Autoplay;
use five_lines::core::{Board, EngineError, GameConfig, IllegalMoveReason, SimpleRng};
use five_lines::engine::Session;
use five_lines::types::{
    Cell, ClearOrigin, Color, Coord, GameOverReason, Phase, TurnEvent,
};

fn quiet() -> GameConfig {
    GameConfig::default().with_initial_pieces(0)
}

fn session_from(board: Board, config: GameConfig) -> Session {
    Session::from_board(config, board, SimpleRng::new(7)).unwrap()
}

/// 9x9 board where no two neighbours on any axis share a color
fn striped_board() -> Board {
    let mut board = Board::default();
    for coord in board.coords().collect::<Vec<_>>() {
        let idx = (coord.row as usize + 2 * coord.col as usize) % 5;
        board.place(coord, Color::ALL[idx]).unwrap();
    }
    board
}

#[test]
fn test_idle_click_on_empty_cell_does_nothing() {
    let mut s = session_from(Board::default(), quiet());
    let result = s.click(Coord::new(4, 4)).unwrap();
    assert!(result.is_empty());
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_selection_clicks() {
    let mut board = Board::default();
    board.place(Coord::new(1, 1), Color::Red).unwrap();
    board.place(Coord::new(7, 7), Color::Blue).unwrap();
    let mut s = session_from(board, quiet());

    assert!(s.click(Coord::new(1, 1)).unwrap().is_empty());
    assert_eq!(s.phase(), Phase::Selected(Coord::new(1, 1)));

    // Another piece switches the selection without moving anything
    assert!(s.click(Coord::new(7, 7)).unwrap().is_empty());
    assert_eq!(s.phase(), Phase::Selected(Coord::new(7, 7)));
    assert_eq!(s.cell_at(Coord::new(1, 1)).unwrap(), Cell::Piece(Color::Red));

    // Same piece deselects
    s.click(Coord::new(7, 7)).unwrap();
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.turn(), 0);
}

#[test]
fn test_row_completed_by_move_clears_exactly_five() {
    let mut board = Board::default();
    for col in 0..4 {
        board.place(Coord::new(0, col), Color::Red).unwrap();
    }
    board.place(Coord::new(6, 6), Color::Red).unwrap();
    let mut s = session_from(board, quiet());

    s.click(Coord::new(6, 6)).unwrap();
    let result = s.click(Coord::new(0, 4)).unwrap();

    let expected: Vec<Coord> = (0..5).map(|c| Coord::new(0, c)).collect();
    let events = result.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], TurnEvent::MoveApplied { .. }));
    assert_eq!(
        events[1],
        TurnEvent::LinesCleared {
            cells: expected,
            score_delta: 10,
            origin: ClearOrigin::Move,
        }
    );
    assert_eq!(s.score(), 10);
    assert_eq!(s.board().occupied_count(), 0);
    assert_eq!(s.phase(), Phase::Idle);
}

#[test]
fn test_larger_clear_scores_more() {
    let mut board = Board::default();
    for col in [0, 1, 2, 4, 5] {
        board.place(Coord::new(2, col), Color::Green).unwrap();
    }
    board.place(Coord::new(8, 3), Color::Green).unwrap();
    let mut s = session_from(board, quiet());

    s.click(Coord::new(8, 3)).unwrap();
    let result = s.click(Coord::new(2, 3)).unwrap();
    assert_eq!(result.score_delta(), 15);
    assert_eq!(result.cleared_cells().count(), 6);
}

#[test]
fn test_unreachable_click_falls_back_to_idle() {
    // (0,0) is walled in by (0,1) and (1,0)
    let mut board = Board::default();
    board.place(Coord::new(0, 1), Color::Blue).unwrap();
    board.place(Coord::new(1, 0), Color::Blue).unwrap();
    board.place(Coord::new(5, 5), Color::Red).unwrap();
    let mut s = session_from(board, quiet());
    let before = s.board().to_codes();

    s.click(Coord::new(5, 5)).unwrap();
    let err = s.click(Coord::new(0, 0)).unwrap_err();

    assert_eq!(err.illegal_reason(), Some(IllegalMoveReason::Unreachable));
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.board().to_codes(), before);
    assert_eq!(s.turn(), 0);
}

#[test]
fn test_spawn_uses_upcoming_colors() {
    let mut board = Board::default();
    board.place(Coord::new(0, 0), Color::Red).unwrap();
    let mut s = session_from(board, quiet());
    let upcoming = s.upcoming();
    assert_eq!(upcoming.len(), 3);

    s.click(Coord::new(0, 0)).unwrap();
    let result = s.click(Coord::new(8, 8)).unwrap();

    let spawned_colors: Vec<Color> = result.spawned().map(|(_, color)| color).collect();
    assert_eq!(spawned_colors, upcoming);
    for (coord, color) in result.spawned() {
        assert_eq!(s.cell_at(coord).unwrap(), Cell::Piece(color));
    }
    assert_eq!(s.board().occupied_count(), 4);
    assert_eq!(s.upcoming().len(), 3);
}

#[test]
fn test_last_empty_cell_refilled_is_game_over() {
    let mut board = striped_board();
    board.remove(Coord::new(4, 4)).unwrap();
    // Spawns are cyan, which the stripes never use, so nothing can line up
    let config = quiet().with_palette([Color::Cyan]);
    let mut s = session_from(board, config);

    s.click(Coord::new(4, 3)).unwrap();
    let result = s.click(Coord::new(4, 4)).unwrap();

    let events = result.events();
    assert!(matches!(events[0], TurnEvent::MoveApplied { .. }));
    assert_eq!(
        events[1],
        TurnEvent::BallsSpawned {
            pieces: vec![(Coord::new(4, 3), Color::Cyan)]
        }
    );
    assert_eq!(
        events[2],
        TurnEvent::GameOver {
            reason: GameOverReason::BoardFull
        }
    );
    assert_eq!(result.cleared_cells().count(), 0);
    assert!(s.is_game_over());
    assert!(s.board().is_full());
}

#[test]
fn test_game_over_rejects_input_until_reset() {
    let board = striped_board();
    let mut s = session_from(board, quiet());
    assert!(s.is_game_over());

    let c = Coord::new(0, 0);
    assert_eq!(s.click(c), Err(EngineError::OperationAfterGameOver));
    assert_eq!(s.select(c), Err(EngineError::OperationAfterGameOver));
    assert_eq!(s.move_to(c), Err(EngineError::OperationAfterGameOver));

    s.reset().unwrap();
    assert!(!s.is_game_over());
    assert_eq!(s.score(), 0);
    assert_eq!(s.turn(), 0);
    assert_eq!(s.board().occupied_count(), 0);
}

#[test]
fn test_reset_deals_initial_pieces() {
    let mut s = Session::with_seed(GameConfig::default(), 2024).unwrap();
    Autoplay::new(1).with_max_turns(Some(10)).run(&mut s).unwrap();
    s.reset().unwrap();

    assert_eq!(s.turn(), 0);
    assert_eq!(s.score(), 0);
    assert!(s.board().occupied_count() <= 5);
    assert_eq!(s.upcoming().len(), 3);
    s.board().check_consistency().unwrap();
}

#[test]
fn test_partition_holds_through_a_whole_game() {
    let mut s = Session::with_seed(GameConfig::default(), 99).unwrap();
    let mut driver = Autoplay::new(99);
    let total = s.board().size();

    while !s.is_game_over() {
        let Some((src, dst)) = driver.pick_move(&s) else {
            break;
        };
        s.click(src).unwrap();
        s.click(dst).unwrap();
        assert_eq!(s.board().occupied_count() + s.empty_cells().len(), total);
        if s.turn() % 10 == 0 {
            s.board().check_consistency().unwrap();
        }
    }
    s.board().check_consistency().unwrap();
}

#[test]
fn test_same_seeds_replay_the_same_game() {
    let play = || {
        let mut s = Session::with_seed(GameConfig::default(), 31337).unwrap();
        let summary = Autoplay::new(5).run(&mut s).unwrap();
        (summary, s.snapshot())
    };
    assert_eq!(play(), play());
}

#[test]
fn test_score_matches_cleared_events() {
    let mut s = Session::with_seed(GameConfig::default(), 8).unwrap();
    let mut driver = Autoplay::new(8);
    let mut total = 0;
    for _ in 0..200 {
        if s.is_game_over() {
            break;
        }
        let Some((src, dst)) = driver.pick_move(&s) else {
            break;
        };
        s.click(src).unwrap();
        total += s.click(dst).unwrap().score_delta();
    }
    assert_eq!(s.score(), total);
}
