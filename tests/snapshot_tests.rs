//! Snapshot tests - presentation view of a session

use five_lines::core::{Board, GameConfig, SimpleRng};
use five_lines::engine::{board_hash, GameSnapshot, Session};
use five_lines::types::{Color, Coord, Phase};

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

fn fnv1a64_cells(cells: &[Vec<u8>]) -> u64 {
    fnv1a64_bytes(cells.iter().flat_map(|row| row.iter().copied()))
}

#[test]
fn snapshot_reflects_board_and_meta() {
    let mut board = Board::new(4, 3).unwrap();
    board.place(Coord::new(0, 0), Color::Red).unwrap();
    board.place(Coord::new(2, 3), Color::Cyan).unwrap();
    let config = GameConfig::default().with_size(4, 3).with_initial_pieces(0);
    let mut s = Session::from_board(config, board, SimpleRng::new(1)).unwrap();
    s.click(Coord::new(0, 0)).unwrap();

    let snap = s.snapshot();
    assert_eq!((snap.width, snap.height), (4, 3));
    assert_eq!(snap.cells, vec![vec![1, 0, 0, 0], vec![0, 0, 0, 0], vec![0, 0, 0, 7]]);
    assert_eq!(snap.phase, Phase::Selected(Coord::new(0, 0)));
    assert_eq!(snap.selected, Some(Coord::new(0, 0)));
    assert_eq!(snap.upcoming, s.upcoming());
    assert_eq!(snap.score, 0);
    assert!(snap.playable());
    assert_eq!(snap.board_hash, fnv1a64_cells(&snap.cells));
}

#[test]
fn snapshot_into_tracks_changes() {
    let mut s = Session::with_seed(GameConfig::default(), 77).unwrap();
    let mut snap = GameSnapshot::default();
    s.snapshot_into(&mut snap);
    let before = snap.board_hash;
    assert_eq!(snap.occupied_count(), s.board().occupied_count());

    // Selection changes metadata only
    let piece = s.board().occupied().next().unwrap().0;
    s.click(piece).unwrap();
    s.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, before);
    assert_eq!(snap.selected, Some(piece));

    let dst = *s
        .empty_cells()
        .iter()
        .find(|&&c| five_lines::core::reach::can_reach(s.board(), piece, c))
        .unwrap();
    s.click(dst).unwrap();
    s.snapshot_into(&mut snap);
    assert_ne!(snap.board_hash, before);
    assert_eq!(snap.board_hash, fnv1a64_cells(&snap.cells));
    assert_eq!(snap.turn, 1);
    assert_eq!(snap, s.snapshot());
}

#[test]
fn board_hash_is_stable() {
    let empty_9x9 = board_hash(std::iter::repeat(0u8).take(81));
    assert_eq!(empty_9x9, fnv1a64_bytes(std::iter::repeat(0u8).take(81)));
    assert_ne!(empty_9x9, board_hash(std::iter::repeat(0u8).take(80)));
}

#[test]
fn snapshot_serializes_to_json() {
    let s = Session::with_seed(GameConfig::default(), 5).unwrap();
    let json = serde_json::to_string(&s.snapshot()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["width"], 9);
    assert_eq!(v["cells"].as_array().unwrap().len(), 9);
    assert_eq!(v["phase"], "Idle");
    assert_eq!(v["game_over"], false);
    assert_eq!(v["upcoming"].as_array().unwrap().len(), 3);
    assert!(v["upcoming"][0].is_string());
    assert!(v.get("board_hash").is_some());
}
