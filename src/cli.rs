//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_engine::{Mark, SparringKind};

/// Tictac - tic-tac-toe against a heuristic opponent
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Play tic-tac-toe against a heuristic opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "tictac.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Mark to play as (X or O); the opponent takes the other
        #[arg(short, long)]
        mark: Option<Mark>,

        /// Seed for the opponent's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play many games between the opponent and a sparring policy
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Seed for both policies
        #[arg(long)]
        seed: Option<u64>,

        /// Sparring policy on the human's side (first or random)
        #[arg(long)]
        sparring: Option<SparringKind>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the opponent's move for a board, e.g. "XX./.O./..."
    Suggest {
        /// Nine squares, row-major: X, O, or . for empty
        board: String,

        /// Mark the opponent plays (defaults to O)
        #[arg(short, long, default_value = "O")]
        mark: Mark,
    },
}
