//! Shax CLI
//!
//! Commands:
//! - match: play a series of games between two computer players
//! - play: play against the computer on the terminal

use clap::{Parser, Subcommand};

mod match_cmd;
mod play;

#[derive(Parser)]
#[command(name = "shax")]
#[command(about = "Shax rules engine and computer opponent")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games between two computer players
    Match(match_cmd::MatchArgs),
    /// Play against the computer
    Play(play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Play(args) => play::run(args),
    }
}
