//! Move sources: where the moves of each colour come from.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::Context;

use crate::board::Coord;
use crate::engine::GameEngine;

/// Supplies moves for the colour on turn.
pub trait MoveSource {
    /// Pick a move for the side to move in `engine`.
    ///
    /// Returns `Ok(None)` when the source has no move to offer, e.g. the
    /// player's input has ended. The returned move may still be illegal;
    /// the caller validates it and asks again.
    fn choose(&mut self, engine: &GameEngine) -> anyhow::Result<Option<Coord>>;
}

/// Picks uniformly among the legal moves.
pub struct RandomMover {
    rng: fastrand::Rng,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMover {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A mover that makes the same choices for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl MoveSource for RandomMover {
    fn choose(&mut self, engine: &GameEngine) -> anyhow::Result<Option<Coord>> {
        Ok(self.rng.choice(engine.legal_moves().iter().copied()))
    }
}

/// One input stream read by several movers, e.g. two humans at one terminal.
pub type SharedInput<R> = Rc<RefCell<R>>;

/// Reads moves typed as `row col`.
///
/// Unreadable or off-board input is reported and the prompt repeated.
pub struct HumanMover<R, W> {
    input: SharedInput<R>,
    output: W,
}

impl<R: BufRead, W: Write> HumanMover<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::sharing(Rc::new(RefCell::new(input)), output)
    }

    /// A mover reading from an input that other movers also read from.
    pub fn sharing(input: SharedInput<R>, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> MoveSource for HumanMover<R, W> {
    fn choose(&mut self, _engine: &GameEngine) -> anyhow::Result<Option<Coord>> {
        loop {
            write!(self.output, "Enter your position (row col), e.g. 4 3: ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .borrow_mut()
                .read_line(&mut line)
                .context("failed to read move")?;
            if read == 0 {
                return Ok(None);
            }

            match line.trim().parse::<Coord>() {
                Ok(coord) => return Ok(Some(coord)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }
}
