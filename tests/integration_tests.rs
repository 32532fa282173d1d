//! Integration tests for othello-rust
//!
//! Whole games are played with seeded random move choices and the board and
//! engine invariants are checked after every move.

use std::collections::BTreeSet;

use othello_rust::board::{Board, Cell, Color, Coord};
use othello_rust::constants::NUM_SQUARES;
use othello_rust::engine::{GameEngine, Outcome, Phase};
use othello_rust::error::GameError;
use othello_rust::player::{MoveSource, RandomMover};

// =============================================================================
// Helper functions
// =============================================================================

fn c(row: i64, col: i64) -> Coord {
    Coord::new(row, col).unwrap()
}

/// Play a sequence of moves from the opening position.
fn setup_engine(moves: &[(i64, i64)]) -> GameEngine {
    let mut engine = GameEngine::new();
    for &(row, col) in moves {
        if let Err(err) = engine.play_at(row, col) {
            panic!("Illegal move ({row}, {col}) in setup: {err}");
        }
    }
    engine
}

/// Check every board invariant that must hold between moves.
fn check_board(board: &Board) {
    let black = board.positions_of(Color::Black).len();
    let white = board.positions_of(Color::White).len();
    assert_eq!(black + white + board.empty_cell_count(), NUM_SQUARES);

    for color in Color::ALL {
        let scanned: BTreeSet<Coord> = Coord::all()
            .filter(|&coord| board.cell(coord).color() == Some(color))
            .collect();
        assert_eq!(&scanned, board.positions_of(color), "{color} set out of sync");

        let legal = board.legal_moves(color);
        for coord in Coord::all().filter(|&coord| board.cell(coord) == Cell::Empty) {
            let flips = board.flips_for(color, coord);
            assert_eq!(
                legal.contains(&coord),
                !flips.is_empty(),
                "{color} at {coord}: legality and flips disagree"
            );
        }
    }
}

/// Play a full random game, checking invariants at every step.
fn play_random_game(seed: u64) -> GameEngine {
    let mut engine = GameEngine::new();
    let mut mover = RandomMover::with_seed(seed);
    check_board(engine.board());

    while let Some(color) = engine.to_move() {
        let coord = mover.choose(&engine).unwrap().expect("side to move has a move");
        let before = engine.board().clone();

        let mut replay = before.clone();
        let expected_flips = replay.apply_move(color, coord);

        let report = engine.apply_move(coord).unwrap();
        assert_eq!(report.flipped, expected_flips);
        assert_eq!(*engine.board(), replay, "applying a move is deterministic");
        assert!(!report.flipped.is_empty());
        for &flipped in &report.flipped {
            assert_eq!(before.cell(flipped), Cell::from(color.opponent()));
            assert_eq!(engine.board().cell(flipped), Cell::from(color));
        }
        assert_eq!(
            engine.board().count(color),
            before.count(color) + report.flipped.len() + 1
        );

        if let Some(skipped) = report.skipped {
            assert_eq!(skipped, color.opponent());
            assert!(engine.board().count(skipped) > 0);
            assert!(engine.board().legal_moves(skipped).is_empty());
            assert_eq!(engine.to_move(), Some(color));
        }
        check_board(engine.board());
    }
    engine
}

// =============================================================================
// Opening
// =============================================================================

#[test]
fn test_opening_moves() {
    let engine = GameEngine::new();
    let expected: BTreeSet<Coord> = [c(3, 4), c(4, 3), c(5, 6), c(6, 5)].into();
    assert_eq!(*engine.legal_moves(), expected);
    assert_eq!(engine.board().empty_cell_count(), 60);
}

#[test]
fn test_each_opening_move_flips_one_piece() {
    for (dest, flipped) in [
        (c(3, 4), c(4, 4)),
        (c(4, 3), c(4, 4)),
        (c(5, 6), c(5, 5)),
        (c(6, 5), c(5, 5)),
    ] {
        let mut engine = GameEngine::new();
        let report = engine.apply_move(dest).unwrap();
        assert_eq!(report.flipped, vec![flipped], "opening move {dest}");
        assert_eq!(engine.board().count(Color::Black), 4);
        assert_eq!(engine.board().count(Color::White), 1);
    }
}

#[test]
fn test_short_sequence() {
    // Black (3,4), White (3,3) retakes (4,4), Black (3,2) takes (3,3)
    let engine = setup_engine(&[(3, 4), (3, 3), (3, 2)]);
    let board = engine.board();
    assert_eq!(board.cell(c(3, 2)), Cell::Black);
    assert_eq!(board.cell(c(3, 3)), Cell::Black);
    assert_eq!(board.cell(c(4, 4)), Cell::White);
    assert_eq!(board.cell(c(5, 5)), Cell::White);
    assert_eq!(board.count(Color::Black), 5);
    assert_eq!(engine.to_move(), Some(Color::White));
    check_board(board);
}

#[test]
fn test_illegal_then_legal() {
    let mut engine = setup_engine(&[(3, 4)]);
    let before = engine.board().clone();
    assert_eq!(
        engine.play_at(3, 4),
        Err(GameError::IllegalMove {
            color: Color::White,
            coord: c(3, 4)
        })
    );
    assert_eq!(
        engine.play_at(9, 1),
        Err(GameError::InvalidPosition { row: 9, col: 1 })
    );
    assert_eq!(*engine.board(), before);
    assert!(engine.play_at(3, 3).is_ok());
}

// =============================================================================
// Whole games
// =============================================================================

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..25 {
        let engine = play_random_game(seed);
        let result = engine.result().expect("game finished");
        let board = engine.board();

        assert_eq!(result.black, board.count(Color::Black));
        assert_eq!(result.white, board.count(Color::White));
        match result.outcome {
            Outcome::BlackWins => assert!(result.black > result.white),
            Outcome::WhiteWins => assert!(result.white > result.black),
            Outcome::Draw => assert_eq!(result.black, result.white),
        }

        let over = board.empty_cell_count() == 0
            || board.count(Color::Black) == 0
            || board.count(Color::White) == 0
            || Color::ALL.iter().all(|&color| board.legal_moves(color).is_empty());
        assert!(over, "seed {seed}: game ended early");
    }
}

#[test]
fn test_same_seed_same_game() {
    let a = play_random_game(99);
    let b = play_random_game(99);
    assert_eq!(a.history(), b.history());
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_full_board_winner_has_more_pieces() {
    let black: Vec<Coord> = Coord::all().filter(|coord| coord.row() <= 5).collect();
    let white: Vec<Coord> = Coord::all().filter(|coord| coord.row() > 5).collect();
    let board = Board::with_pieces(&black, &white).unwrap();
    let engine = GameEngine::from_board(board, Color::Black);
    match engine.phase() {
        Phase::GameOver(result) => {
            assert_eq!(result.outcome, Outcome::BlackWins);
            assert_eq!((result.black, result.white), (40, 24));
        }
        phase => panic!("expected game over, got {phase:?}"),
    }
}

#[test]
fn test_skip_is_not_game_over() {
    // Black's only piece sits in the corner row with nothing to capture,
    // while White can take the last empty square.
    let white: Vec<Coord> = Coord::all()
        .filter(|&coord| coord != c(1, 1) && coord != c(1, 2))
        .collect();
    let board = Board::with_pieces(&[c(1, 2)], &white).unwrap();
    assert!(board.legal_moves(Color::Black).is_empty());

    let engine = GameEngine::from_board(board, Color::Black);
    assert!(!engine.is_over());
    assert_eq!(engine.last_skipped(), Some(Color::Black));
    assert_eq!(engine.phase(), Phase::AwaitingMove(Color::White));
}
