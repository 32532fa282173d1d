//! Othello-Rust: Othello (Reversi) rules engine and text play loop.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and square encoding
//! - [`board`] - Padded grid, legal moves and flip resolution
//! - [`engine`] - Turn order, skips and game-over detection
//! - [`player`] - Move sources (random computer player, human input)
//! - [`session`] - Text play loop over any output stream
//! - [`error`] - Errors reported to move sources
//!
//! ## Example
//!
//! ```
//! use othello_rust::board::{Color, Coord};
//! use othello_rust::engine::{GameEngine, Phase};
//!
//! let mut engine = GameEngine::new();
//! assert_eq!(engine.legal_moves().len(), 4);
//!
//! let report = engine.apply_move(Coord::new(3, 4).unwrap()).unwrap();
//! assert_eq!(report.flipped, vec![Coord::new(4, 4).unwrap()]);
//! assert_eq!(engine.phase(), Phase::AwaitingMove(Color::White));
//! println!("{}", engine.board());
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod player;
pub mod session;
