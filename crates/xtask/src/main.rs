//! Development tasks for the Downfall workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{InspectLevel, Replay, Simulate};

/// Development tasks for the Downfall workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for Downfall", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Auto-play a level headlessly and report the outcome
    Simulate(Simulate),

    /// Replay a recorded run and verify its state root
    Replay(Replay),

    /// Print a level's configuration and its starting board
    InspectLevel(InspectLevel),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
        Command::InspectLevel(cmd) => cmd.execute(),
    }
}
