//! Turn phases and outcomes for the turn engine.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line.
    Winner(Mark),
    /// The board filled with no line completed.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "Player {} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Whose turn it is, or how the game ended.
///
/// `Terminal` always carries its outcome; there is no terminal phase without
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human's move.
    HumanTurn,
    /// Waiting for the engine to play the opponent's move.
    OpponentTurn,
    /// The game is decided.
    Terminal(Outcome),
}

impl Phase {
    /// Returns true once the game is decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    /// The outcome, if the game is decided.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Terminal(outcome) => Some(*outcome),
            Phase::HumanTurn | Phase::OpponentTurn => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::HumanTurn => write!(f, "human turn"),
            Phase::OpponentTurn => write!(f, "opponent turn"),
            Phase::Terminal(outcome) => write!(f, "finished game ({})", outcome),
        }
    }
}
