//! Command line driver for the combat engine.
//!
//! Loads a content directory and runs encounters through [`engine::CombatEngine`]
//! exactly as a game server would, printing every response as JSON.

mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Simulate, Validate};

/// Combat session engine tools
#[derive(Parser)]
#[command(name = "combat-cli")]
#[command(about = "Run and inspect combat encounters", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to `combat.log` in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play encounters against loaded content
    Simulate(Simulate),

    /// Load a content directory and report what it contains
    Validate(Validate),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Simulate(cmd) => cmd.execute().await,
        Command::Validate(cmd) => cmd.execute(),
    }
}
