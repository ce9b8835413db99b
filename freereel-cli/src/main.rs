//! Freereel CLI - Command-line interface
//!
//! Resolves catalog titles against the public archive and demonstrates the
//! adaptive playback session from the terminal.

mod commands;

use clap::Parser;
use freereel_core::tracing_setup::{self, CliLogLevel};

#[derive(Parser)]
#[command(name = "freereel")]
#[command(about = "Find and play free, legally streamable copies of movies")]
struct Cli {
    /// Console log level
    #[arg(long, default_value = "info")]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(cli.log_level.as_tracing_level(), None)?;

    commands::handle_command(cli.command).await?;

    Ok(())
}
