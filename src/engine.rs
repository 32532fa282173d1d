//! Turn sequencing and game-over detection.
//!
//! [`GameEngine`] owns the single [`Board`] of a game and is the only thing
//! that mutates it during play. Each turn it derives a fresh [`GameState`]
//! (side to move plus its legal moves) from the board. Skips and the end of
//! the game are resolved as soon as a turn starts, so callers only ever see
//! `AwaitingMove` for a colour that actually has a move.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info};

use crate::board::{Board, Color, Coord};
use crate::error::GameError;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::BlackWins => Some(Color::Black),
            Outcome::WhiteWins => Some(Color::White),
            Outcome::Draw => None,
        }
    }
}

/// Final piece counts and the outcome they imply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black: usize,
    pub white: usize,
}

impl GameResult {
    pub fn from_board(board: &Board) -> Self {
        let black = board.count(Color::Black);
        let white = board.count(Color::White);
        let outcome = if black > white {
            Outcome::BlackWins
        } else if white > black {
            Outcome::WhiteWins
        } else {
            Outcome::Draw
        };
        Self {
            outcome,
            black,
            white,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::BlackWins => write!(f, "Black wins, {} pieces to {}", self.black, self.white),
            Outcome::WhiteWins => write!(f, "White wins, {} pieces to {}", self.white, self.black),
            Outcome::Draw => write!(f, "Draw, {} pieces each", self.black),
        }
    }
}

/// Where the game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove(Color),
    GameOver(GameResult),
}

/// The side to move and its legal moves, fixed for the duration of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    turn: Color,
    legal_moves: BTreeSet<Coord>,
}

impl GameState {
    fn new(board: &Board, turn: Color) -> Self {
        Self {
            turn,
            legal_moves: board.legal_moves(turn),
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn legal_moves(&self) -> &BTreeSet<Coord> {
        &self.legal_moves
    }

    pub fn is_legal(&self, coord: Coord) -> bool {
        self.legal_moves.contains(&coord)
    }
}

/// A placement that was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub color: Color,
    pub coord: Coord,
}

/// What happened when a move was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub color: Color,
    pub coord: Coord,
    /// Opponent pieces turned over by the move
    pub flipped: Vec<Coord>,
    /// Colour whose following turn was skipped for lack of moves
    pub skipped: Option<Color>,
    /// Phase after the move (and any skip) took effect
    pub phase: Phase,
}

/// Runs one game of Othello.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    state: GameState,
    result: Option<GameResult>,
    /// Colour skipped when the current turn was resolved
    skipped: Option<Color>,
    history: Vec<Move>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// A new game from the opening position, Black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Black)
    }

    /// Continue from an arbitrary position with `to_move` on turn.
    ///
    /// The turn is resolved immediately: if `to_move` has no move it is
    /// skipped, and a position with no moves for either side is already over.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let state = GameState::new(&board, to_move);
        let mut engine = Self {
            board,
            state,
            result: None,
            skipped: None,
            history: Vec::new(),
        };
        engine.advance(to_move);
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Legal moves for the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> &BTreeSet<Coord> {
        self.state.legal_moves()
    }

    pub fn phase(&self) -> Phase {
        match self.result {
            Some(result) => Phase::GameOver(result),
            None => Phase::AwaitingMove(self.state.turn),
        }
    }

    /// The colour on turn, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Color> {
        match self.result {
            Some(_) => None,
            None => Some(self.state.turn),
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// The colour that was skipped to reach the current turn, if any.
    pub fn last_skipped(&self) -> Option<Color> {
        self.skipped
    }

    /// Moves applied so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Apply a move for the side to move.
    ///
    /// # Errors
    /// - `GameError::GameOver` - the game has finished
    /// - `GameError::IllegalMove` - `coord` is not a legal move; nothing changes
    pub fn apply_move(&mut self, coord: Coord) -> Result<MoveReport, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let color = self.state.turn;
        if !self.state.is_legal(coord) {
            return Err(GameError::IllegalMove { color, coord });
        }

        let flipped = self.board.apply_move(color, coord);
        debug!("{color} plays {coord}, flipping {} piece(s)", flipped.len());
        self.history.push(Move { color, coord });
        self.advance(color.opponent());

        Ok(MoveReport {
            color,
            coord,
            flipped,
            skipped: self.skipped,
            phase: self.phase(),
        })
    }

    /// Apply a move on behalf of `color`.
    ///
    /// Same as [`GameEngine::apply_move`], but a move submitted by the colour
    /// not on turn is rejected as `IllegalMove`.
    pub fn play(&mut self, color: Color, coord: Coord) -> Result<MoveReport, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        if color != self.state.turn {
            return Err(GameError::IllegalMove { color, coord });
        }
        self.apply_move(coord)
    }

    /// Apply a move given as raw row/column values from a move source.
    ///
    /// # Errors
    /// `GameError::InvalidPosition` for off-board values, otherwise as
    /// [`GameEngine::apply_move`].
    pub fn play_at(&mut self, row: i64, col: i64) -> Result<MoveReport, GameError> {
        let coord = Coord::new(row, col)?;
        self.apply_move(coord)
    }

    /// Resolve the turn for `to_move`: game over, skip, or await a move.
    fn advance(&mut self, to_move: Color) {
        self.skipped = None;
        let state = GameState::new(&self.board, to_move);

        let wiped_out = Color::ALL.iter().any(|&c| self.board.count(c) == 0);
        if self.board.empty_cell_count() == 0 || wiped_out {
            self.finish(state);
            return;
        }
        if !state.legal_moves.is_empty() {
            self.state = state;
            return;
        }

        let other = GameState::new(&self.board, to_move.opponent());
        if other.legal_moves.is_empty() {
            self.finish(state);
            return;
        }
        debug!("{to_move} has no legal moves, turn passes to {}", other.turn);
        self.skipped = Some(to_move);
        self.state = other;
    }

    fn finish(&mut self, state: GameState) {
        let result = GameResult::from_board(&self.board);
        info!("game over after {} moves: {result}", self.history.len());
        self.result = Some(result);
        self.state = state;
    }
}
