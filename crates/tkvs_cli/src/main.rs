//! tkvs CLI
//!
//! Interactive shell for the tkvs transactional key-value store.
//!
//! Reads commands from stdin (`SET`, `GET`, `DELETE`, `COUNT`, `BEGIN`,
//! `COMMIT`, `ROLLBACK`), dispatches each to the engine, and prints the
//! result. The engine strategy is chosen at startup with `--engine`.

mod command;
mod parser;
mod repl;

use clap::{Parser, ValueEnum};
use std::io;
use tkvs_core::Strategy;
use tracing_subscriber::EnvFilter;

/// Engine strategy selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Engine {
    /// Single map with per-transaction undo logs; O(1) COUNT.
    ChangeLog,
    /// Stack of full map snapshots; O(n) COUNT.
    Snapshot,
}

impl From<Engine> for Strategy {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::ChangeLog => Strategy::ChangeLog,
            Engine::Snapshot => Strategy::SnapshotStack,
        }
    }
}

/// Interactive transactional key-value store.
#[derive(Parser)]
#[command(name = "tkvs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine implementation strategy
    #[arg(short, long, value_enum, default_value = "change-log")]
    engine: Engine,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut store = Strategy::from(cli.engine).new_store();
    repl::run(store.as_mut(), io::stdin().lock(), io::stdout())
}
