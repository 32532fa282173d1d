//! Othello-Rust: play Othello in the terminal.
//!
//! ## Usage
//!
//! - `othello-rust` - Watch two computer players (same as `demo`)
//! - `othello-rust play` - Human (Black) against the computer (White)
//! - `othello-rust play --black human --white human` - Two humans, one terminal
//! - `othello-rust demo --seed 7` - Reproducible computer game
//!
//! Set `RUST_LOG=info` to log every move to stderr.

use std::cell::RefCell;
use std::io::{self, StdinLock};
use std::rc::Rc;

use clap::{Parser, Subcommand};

use othello_rust::player::{HumanMover, MoveSource, RandomMover, SharedInput};
use othello_rust::session::{PlayerKind, Session, SessionConfig};

/// Othello-Rust: Othello in the terminal
#[derive(Parser)]
#[command(name = "othello-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game, each colour controlled by a human or the computer
    Play {
        /// Who plays Black
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        black: PlayerKind,
        /// Who plays White
        #[arg(long, value_enum, default_value_t = PlayerKind::Computer)]
        white: PlayerKind,
        /// Seed for the computer players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Watch two computer players
    Demo {
        /// Seed for the computer players
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.command {
        Some(Commands::Play { black, white, seed }) => SessionConfig { black, white, seed },
        Some(Commands::Demo { seed }) => demo_config(seed),
        None => demo_config(None),
    };
    run_session(&config)
}

fn demo_config(seed: Option<u64>) -> SessionConfig {
    SessionConfig {
        black: PlayerKind::Computer,
        white: PlayerKind::Computer,
        seed,
    }
}

fn run_session(config: &SessionConfig) -> anyhow::Result<()> {
    // Stdin is locked once; both human players read through the same lock.
    let input: SharedInput<StdinLock<'static>> = Rc::new(RefCell::new(io::stdin().lock()));

    // Offset White's seed so the two computer players don't mirror each other.
    let black = move_source(config.black, config.seed, &input);
    let white = move_source(
        config.white,
        config.seed.map(|s| s.wrapping_add(1)),
        &input,
    );

    let mut session = Session::new(black, white, io::stdout());
    session.print_rules()?;
    if session.run()?.is_none() {
        println!("Game abandoned");
    }
    Ok(())
}

fn move_source(
    kind: PlayerKind,
    seed: Option<u64>,
    input: &SharedInput<StdinLock<'static>>,
) -> Box<dyn MoveSource> {
    match kind {
        PlayerKind::Human => Box::new(HumanMover::sharing(Rc::clone(input), io::stdout())),
        PlayerKind::Computer => match seed {
            Some(seed) => Box::new(RandomMover::with_seed(seed)),
            None => Box::new(RandomMover::new()),
        },
    }
}
