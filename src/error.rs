//! Errors surfaced to move sources and callers of the engine.

use std::fmt;

use crate::board::{Color, Coord};

/// Why a request against the board or engine was rejected.
///
/// None of these leave the board in a modified state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside the 1..=8 playable range
    InvalidPosition { row: i64, col: i64 },
    /// On-board coordinate that is not a legal move for the colour
    IllegalMove { color: Color, coord: Coord },
    /// The game has already finished
    GameOver,
    /// A custom setup listed the same square for both colours
    Occupied(Coord),
    /// Text that could not be read as a coordinate
    Parse(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPosition { row, col } => {
                write!(f, "invalid position: ({row}, {col}) is off the board")
            }
            GameError::IllegalMove { color, coord } => {
                write!(f, "illegal move: {color} cannot play {coord}")
            }
            GameError::GameOver => write!(f, "game is already over"),
            GameError::Occupied(coord) => write!(f, "square {coord} is already occupied"),
            GameError::Parse(text) => write!(f, "cannot read a position from '{text}'"),
        }
    }
}

impl std::error::Error for GameError {}
