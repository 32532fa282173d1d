//! Text play loop.
//!
//! A [`Session`] drives one [`GameEngine`] to completion: it prints the
//! board and the legal moves, asks the move source of the colour on turn
//! for a move, reports illegal moves and asks again, and announces skips
//! and the final result.

use std::io::Write;

use log::info;

use crate::board::{Color, Coord, Glyphs};
use crate::engine::{GameEngine, GameResult, Phase};
use crate::error::GameError;
use crate::player::MoveSource;

/// Who supplies the moves for one colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// Options for a play session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub black: PlayerKind,
    pub white: PlayerKind,
    /// Seed for computer players; random if unset
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            black: PlayerKind::Human,
            white: PlayerKind::Computer,
            seed: None,
        }
    }
}

const RULES: &str = "\
Welcome to Othello!
==========

Rules:
 1. Black is shown as 'b' and White as 'w'.
 2. Black plays first.
 3. If a player has no legal moves, the other player plays again.
 4. If neither player has a legal move, the game ends.
 5. The player with the most pieces wins, otherwise it is a draw.
";

/// One game played over a text stream.
pub struct Session<Out> {
    engine: GameEngine,
    black: Box<dyn MoveSource>,
    white: Box<dyn MoveSource>,
    out: Out,
    glyphs: Glyphs,
}

impl<Out: Write> Session<Out> {
    /// A session starting from the opening position.
    pub fn new(black: Box<dyn MoveSource>, white: Box<dyn MoveSource>, out: Out) -> Self {
        Self::with_engine(GameEngine::new(), black, white, out)
    }

    pub fn with_engine(
        engine: GameEngine,
        black: Box<dyn MoveSource>,
        white: Box<dyn MoveSource>,
        out: Out,
    ) -> Self {
        Self {
            engine,
            black,
            white,
            out,
            glyphs: Glyphs::default(),
        }
    }

    /// Draw the board with `glyphs` instead of the default `b`/`w`/`-`.
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn into_output(self) -> Out {
        self.out
    }

    pub fn print_rules(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "{RULES}")?;
        Ok(())
    }

    /// Play until the game ends.
    ///
    /// Returns the result, or `None` if a move source ran out of moves
    /// before the game finished.
    pub fn run(&mut self) -> anyhow::Result<Option<GameResult>> {
        if let Some(skipped) = self.engine.last_skipped() {
            self.announce_skip(skipped)?;
        }

        loop {
            writeln!(self.out, "{}", self.engine.board().display_with(&self.glyphs))?;

            let color = match self.engine.phase() {
                Phase::GameOver(result) => {
                    writeln!(self.out, "{result}")?;
                    writeln!(self.out, "Game end")?;
                    return Ok(Some(result));
                }
                Phase::AwaitingMove(color) => color,
            };

            let moves = format_moves(self.engine.legal_moves().iter().copied());
            writeln!(self.out, "{color} plays now")?;
            writeln!(self.out, "Legal moves for {color}: {moves}")?;
            info!("legal moves for {color}: {moves}");

            if !self.take_turn(color)? {
                writeln!(self.out, "No move from {color}, leaving the game")?;
                return Ok(None);
            }
        }
    }

    /// Ask `color`'s source until it supplies a legal move.
    ///
    /// Returns `false` if the source gave up.
    fn take_turn(&mut self, color: Color) -> anyhow::Result<bool> {
        loop {
            let source = match color {
                Color::Black => &mut self.black,
                Color::White => &mut self.white,
            };
            let Some(coord) = source.choose(&self.engine)? else {
                return Ok(false);
            };

            match self.engine.apply_move(coord) {
                Ok(report) => {
                    writeln!(self.out, "Just played {coord}")?;
                    info!(
                        "{color} played {coord}, flipped {}",
                        format_moves(report.flipped.iter().copied())
                    );
                    if let Some(skipped) = report.skipped {
                        self.announce_skip(skipped)?;
                    }
                    return Ok(true);
                }
                Err(err @ GameError::IllegalMove { .. }) => {
                    writeln!(self.out, "{err}")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn announce_skip(&mut self, skipped: Color) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "{skipped} has no legal moves, {} plays again",
            skipped.opponent()
        )?;
        info!("{skipped} skipped");
        Ok(())
    }
}

fn format_moves(moves: impl Iterator<Item = Coord>) -> String {
    moves.map(|m| m.to_string()).collect::<Vec<_>>().join(" ")
}
