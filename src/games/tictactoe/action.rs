//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record which mark went
//! where, so a game can be replayed or inspected after the fact.

use super::phases::Phase;
use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The position where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the mark placed by this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The index does not name a square (must be 0-8).
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    SquareOccupied(Position),

    /// The operation does not match whose turn it is.
    #[display("Not allowed during {}", _0)]
    OutOfTurn(Phase),
}

impl std::error::Error for InvalidMove {}

/// Error that can occur when validating or applying a move.
///
/// Failed operations never modify the state they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The move itself is illegal.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// The game has ended; only a reset is possible.
    #[display("Game is already over")]
    GameOver,

    /// A policy was asked to move on a full board.
    #[display("No move available")]
    NoMoveAvailable,
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::InvalidMove(reason) => Some(reason),
            MoveError::GameOver | MoveError::NoMoveAvailable => None,
        }
    }
}

impl From<InvalidMove> for MoveError {
    fn from(reason: InvalidMove) -> Self {
        MoveError::InvalidMove(reason)
    }
}

impl MoveError {
    /// True for every [`MoveError::InvalidMove`] reason.
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, MoveError::InvalidMove(_))
    }
}
