//! Tictac - terminal front end
//!
//! Plays the engine on stdin/stdout, runs batch simulations, and answers
//! one-off "what would the opponent do here" queries.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use std::time::Duration;
use tictac_engine::{
    Board, EngineConfig, GameState, HeuristicOpponent, Mark, Phase, Position, TurnEngine, simulate,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = match cli.command {
        Command::Simulate { .. } => "info",
        Command::Play { .. } | Command::Suggest { .. } => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play { mark, seed } => {
            let mut config = config;
            if let Some(mark) = mark {
                config = config.with_human_mark(mark);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(&config)
        }
        Command::Simulate {
            games,
            seed,
            sparring,
            json,
        } => {
            let mut config = config;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(sparring) = sparring {
                config = config.with_sparring(sparring);
            }
            run_simulate(&config, games, json)
        }
        Command::Suggest { board, mark } => run_suggest(&board, mark, &config),
    }
}

/// Interactive game loop.
#[instrument(skip(config))]
fn run_play(config: &EngineConfig) -> Result<()> {
    let opponent = match config.seed() {
        Some(seed) => HeuristicOpponent::seeded(*seed),
        None => HeuristicOpponent::from_entropy(),
    };
    let mut engine = TurnEngine::new(*config.human_mark(), opponent);
    let delay = Duration::from_millis(*config.think_delay_ms());

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = engine.reset();

    println!(
        "You are {} and the opponent is {}. Enter a square (1-9) or q to quit.",
        state.human(),
        state.opponent()
    );

    loop {
        print_state(&state);

        if state.is_terminal() {
            if !prompt_yes(&mut lines, "Play again? [y/N] ")? {
                return Ok(());
            }
            state = engine.reset();
            continue;
        }

        if state.phase() == Phase::OpponentTurn {
            std::thread::sleep(delay);
            state = engine.advance(&state)?;
            continue;
        }

        let Some(line) = prompt(&mut lines, "> ")? else {
            return Ok(());
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let Some(pos) = Position::from_cell_or_label(input) else {
            println!("Enter a square number from 1 to 9.");
            continue;
        };

        match engine.submit_move(&state, pos.to_index()) {
            Ok(next) => state = next,
            Err(e) => {
                debug!(error = %e, "Rejected input");
                println!("{}", e);
            }
        }
    }
}

fn print_state(state: &GameState) {
    println!("\n{}\n", state.board());
    println!("{}", state.status_message());
}

fn prompt<I>(lines: &mut I, text: &str) -> Result<Option<String>>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    print!("{}", text);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    lines.next().transpose().context("Failed to read stdin")
}

fn prompt_yes<I>(lines: &mut I, text: &str) -> Result<bool>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    Ok(prompt(lines, text)?
        .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
        .unwrap_or(false))
}

/// Batch simulation.
#[instrument(skip(config))]
fn run_simulate(config: &EngineConfig, games: usize, json: bool) -> Result<()> {
    let report = simulate(config, games)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// One-off heuristic decision.
#[instrument(skip(config))]
fn run_suggest(board: &str, mark: Mark, config: &EngineConfig) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;
    if board.available_moves().is_empty() {
        bail!("Board is full");
    }

    let mut ai = match config.seed() {
        Some(seed) => HeuristicOpponent::seeded(*seed),
        None => HeuristicOpponent::from_entropy(),
    };
    let decision = ai.decide(&board, mark, mark.opponent())?;
    info!(position = %decision.position, rule = %decision.rule, "Suggested move");

    println!("{}\n", board);
    println!(
        "{} plays square {} ({}) by rule: {}",
        mark,
        decision.position.to_index() + 1,
        decision.position,
        decision.rule
    );
    Ok(())
}
