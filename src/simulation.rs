//! Batch games between the heuristic opponent and a sparring policy.

use crate::config::{EngineConfig, SparringKind};
use crate::games::tictactoe::{
    FirstAvailable, GameState, HeuristicOpponent, MoveError, MovePolicy, Outcome, Phase,
    RandomMover, TurnEngine,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Tally of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: usize,
    /// Games the heuristic opponent won.
    pub opponent_wins: usize,
    /// Games the sparring policy (playing the human's side) won.
    pub human_wins: usize,
    /// Drawn games.
    pub draws: usize,
    /// Seed the run used; pass it back to reproduce the run.
    pub seed: u64,
    /// Policy that played the human's side.
    pub sparring: SparringKind,
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games vs {} (seed {}): opponent {} / human {} / draw {}",
            self.games, self.sparring, self.seed, self.opponent_wins, self.human_wins, self.draws
        )
    }
}

/// Plays one game to the end, `sparring` choosing the human's moves.
pub fn play_out<P, S>(engine: &mut TurnEngine<P>, sparring: &mut S) -> Result<GameState, MoveError>
where
    P: MovePolicy,
    S: MovePolicy + ?Sized,
{
    let mut state = engine.reset();
    loop {
        state = match state.phase() {
            Phase::HumanTurn => {
                let pos = sparring.choose(state.board(), state.human(), state.opponent())?;
                engine.submit_move(&state, pos.to_index())?
            }
            Phase::OpponentTurn => engine.advance(&state)?,
            Phase::Terminal(_) => return Ok(state),
        };
    }
}

/// Runs `games` games with the settings in `config`.
///
/// Without a configured seed a random one is drawn and recorded in the
/// report.
#[instrument(skip(config), fields(sparring = %config.sparring()))]
pub fn simulate(config: &EngineConfig, games: usize) -> Result<SimulationReport, MoveError> {
    let seed = config.seed().unwrap_or_else(rand::random);
    let mut engine = TurnEngine::new(*config.human_mark(), HeuristicOpponent::seeded(seed));
    let mut sparring: Box<dyn MovePolicy> = match config.sparring() {
        SparringKind::First => Box::new(FirstAvailable),
        SparringKind::Random => Box::new(RandomMover::seeded(seed.wrapping_add(1))),
    };

    let mut report = SimulationReport {
        games,
        opponent_wins: 0,
        human_wins: 0,
        draws: 0,
        seed,
        sparring: *config.sparring(),
    };

    for game in 0..games {
        let state = play_out(&mut engine, &mut sparring)?;
        match state.outcome() {
            Some(Outcome::Winner(mark)) if mark == state.opponent() => report.opponent_wins += 1,
            Some(Outcome::Winner(_)) => report.human_wins += 1,
            Some(Outcome::Draw) | None => report.draws += 1,
        }
        debug!(game, outcome = ?state.outcome(), moves = state.history().len(), "Game finished");
    }

    info!(
        opponent_wins = report.opponent_wins,
        human_wins = report.human_wins,
        draws = report.draws,
        "Simulation complete"
    );
    Ok(report)
}
