//! Simple policies for exercising the engine.

use super::MovePolicy;
use crate::games::tictactoe::action::MoveError;
use crate::games::tictactoe::{Board, Mark, Position};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks the first empty square.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl MovePolicy for FirstAvailable {
    fn choose(&mut self, board: &Board, _me: Mark, _them: Mark) -> Result<Position, MoveError> {
        Position::ALL
            .iter()
            .copied()
            .find(|&pos| board.is_empty(pos))
            .ok_or(MoveError::NoMoveAvailable)
    }

    fn name(&self) -> &str {
        "first-available"
    }
}

/// Picks uniformly among empty squares.
#[derive(Debug, Clone)]
pub struct RandomMover<R = ChaCha8Rng> {
    rng: R,
}

impl RandomMover<ChaCha8Rng> {
    /// Mover with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomMover<R> {
    /// Mover drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MovePolicy for RandomMover<R> {
    fn choose(&mut self, board: &Board, _me: Mark, _them: Mark) -> Result<Position, MoveError> {
        board
            .available_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(MoveError::NoMoveAvailable)
    }

    fn name(&self) -> &str {
        "random"
    }
}
