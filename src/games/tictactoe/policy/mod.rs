//! Move-selection policies.
//!
//! A policy looks at a board and picks a square for `me`. The turn engine
//! uses one to play the opponent; simulations use another to stand in for
//! the human.

mod heuristic;
mod sparring;

pub use heuristic::{Decision, HeuristicOpponent, Rule, winning_moves};
pub use sparring::{FirstAvailable, RandomMover};

use super::action::MoveError;
use super::{Board, Mark, Position};

/// Chooses moves.
pub trait MovePolicy {
    /// Picks an empty square for `me`, playing against `them`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoMoveAvailable`] if the board is full.
    fn choose(&mut self, board: &Board, me: Mark, them: Mark) -> Result<Position, MoveError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

impl<P: MovePolicy + ?Sized> MovePolicy for Box<P> {
    fn choose(&mut self, board: &Board, me: Mark, them: Mark) -> Result<Position, MoveError> {
        (**self).choose(board, me, them)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
