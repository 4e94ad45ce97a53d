//! Tic-tac-toe rules, the heuristic opponent, and the turn engine.

mod action;
mod contracts;
mod engine;
mod invariants;
mod phases;
mod policy;
mod position;
pub mod rules;
mod types;

pub use action::{InvalidMove, Move, MoveError};
pub use contracts::{
    Contract, HumanMoveContract, InBounds, LegalPlacement, OpponentMoveContract, PhaseAllows,
    SquareIsEmpty,
};
pub use engine::{GameState, InconsistentState, TurnEngine};
pub use invariants::{
    BalancedMarksInvariant, Invariant, InvariantSet, InvariantViolation, MonotonicBoardInvariant,
    PhaseConsistentInvariant, TurnInvariants,
};
pub use phases::{Outcome, Phase};
pub use policy::{
    Decision, FirstAvailable, HeuristicOpponent, MovePolicy, RandomMover, Rule, winning_moves,
};
pub use position::Position;
pub use types::{Board, BoardParseError, Mark, Square};
