//! Fixed-priority heuristic opponent.
//!
//! Rules, first match wins:
//!
//! 1. Win: complete one of our lines.
//! 2. Block: take the square that would complete one of theirs.
//! 3. Center.
//! 4. A random free corner.
//! 5. A random free side.
//! 6. Any random free square.
//!
//! Rules 1 and 2 scan free squares in ascending order and take the first hit,
//! so they are deterministic. Rules 4-6 draw from the injected RNG.

use super::MovePolicy;
use crate::games::tictactoe::action::MoveError;
use crate::games::tictactoe::rules::is_win;
use crate::games::tictactoe::{Board, Mark, Position};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which rule produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Rule {
    /// Completes a line for the mover.
    Win,
    /// Blocks a line the other side would complete.
    Block,
    /// Takes the center.
    Center,
    /// Takes a random free corner.
    Corner,
    /// Takes a random free side.
    Side,
    /// Takes any random free square.
    Fallback,
}

/// A chosen move and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Where to play.
    pub position: Position,
    /// Why.
    pub rule: Rule,
}

/// Free squares where `mark` would complete a line, ascending.
pub fn winning_moves(board: &Board, mark: Mark) -> Vec<Position> {
    board
        .available_moves()
        .into_iter()
        .filter(|&pos| completes_line(board, pos, mark))
        .collect()
}

fn completes_line(board: &Board, pos: Position, mark: Mark) -> bool {
    matches!(board.place(pos.to_index(), mark), Ok(next) if is_win(&next, mark))
}

/// The opponent's move-selection policy.
///
/// Generic over its random source so tests can pin the tie-breaks.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent<R = ChaCha8Rng> {
    rng: R,
}

impl HeuristicOpponent<ChaCha8Rng> {
    /// Opponent with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Opponent seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> HeuristicOpponent<R> {
    /// Opponent drawing tie-breaks from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Chooses a move for `me` and reports which rule fired.
    #[instrument(level = "debug", skip(self, board))]
    pub fn decide(&mut self, board: &Board, me: Mark, them: Mark) -> Result<Decision, MoveError> {
        let available = board.available_moves();
        if available.is_empty() {
            return Err(MoveError::NoMoveAvailable);
        }

        let decision = if let Some(&pos) = available
            .iter()
            .find(|&&pos| completes_line(board, pos, me))
        {
            Decision {
                position: pos,
                rule: Rule::Win,
            }
        } else if let Some(&pos) = available
            .iter()
            .find(|&&pos| completes_line(board, pos, them))
        {
            Decision {
                position: pos,
                rule: Rule::Block,
            }
        } else if available.contains(&Position::Center) {
            Decision {
                position: Position::Center,
                rule: Rule::Center,
            }
        } else if let Some(decision) = self.pick(&available, Position::is_corner, Rule::Corner) {
            decision
        } else if let Some(decision) = self.pick(&available, Position::is_side, Rule::Side) {
            decision
        } else {
            self.pick(&available, |_| true, Rule::Fallback)
                .ok_or(MoveError::NoMoveAvailable)?
        };

        debug!(position = %decision.position, rule = %decision.rule, "Heuristic decision");
        Ok(decision)
    }

    /// Uniform choice among the free squares passing `filter`.
    fn pick(
        &mut self,
        available: &[Position],
        filter: impl Fn(Position) -> bool,
        rule: Rule,
    ) -> Option<Decision> {
        let candidates: Vec<Position> = available.iter().copied().filter(|&p| filter(p)).collect();
        candidates
            .choose(&mut self.rng)
            .map(|&position| Decision { position, rule })
    }
}

impl<R: Rng> MovePolicy for HeuristicOpponent<R> {
    fn choose(&mut self, board: &Board, me: Mark, them: Mark) -> Result<Position, MoveError> {
        self.decide(board, me, them).map(|d| d.position)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
