//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{InvalidMove, MoveError};
use super::engine::GameState;
use super::invariants::{InvariantSet, InvariantViolation, TurnInvariants};
use super::phases::Phase;
use super::{Board, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the index names a square.
pub struct InBounds;

impl InBounds {
    /// Resolves `index` to a position.
    pub fn check(index: usize) -> Result<Position, MoveError> {
        Position::from_index(index).ok_or(MoveError::InvalidMove(InvalidMove::OutOfBounds(index)))
    }
}

/// Precondition: the square at the position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails if `pos` is occupied on `board`.
    pub fn check(board: &Board, pos: Position) -> Result<(), MoveError> {
        if board.is_empty(pos) {
            Ok(())
        } else {
            Err(MoveError::InvalidMove(InvalidMove::SquareOccupied(pos)))
        }
    }
}

/// Composite precondition: the index is on the board and its square is empty.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates a placement and returns the resolved position.
    pub fn check(board: &Board, index: usize) -> Result<Position, MoveError> {
        let pos = InBounds::check(index)?;
        SquareIsEmpty::check(board, pos)?;
        Ok(pos)
    }
}

// ─────────────────────────────────────────────────────────────
//  Phase Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is in the phase an operation expects.
pub struct PhaseAllows;

impl PhaseAllows {
    /// Terminal games reject everything with `GameOver`; any other mismatch
    /// is an out-of-turn move.
    #[instrument(level = "debug", skip(state), fields(phase = %state.phase()))]
    pub fn check(state: &GameState, expected: Phase) -> Result<(), MoveError> {
        match state.phase() {
            Phase::Terminal(_) => {
                warn!("Move attempted on a finished game");
                Err(MoveError::GameOver)
            }
            actual if actual == expected => Ok(()),
            actual => {
                warn!(expected = %expected, "Move attempted out of turn");
                Err(MoveError::InvalidMove(InvalidMove::OutOfTurn(actual)))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Turn Contracts (Pre + Post)
// ─────────────────────────────────────────────────────────────

fn one_move_later(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
    TurnInvariants::check_all(after)?;
    if after.history().len() != before.history().len() + 1 {
        return Err(vec![InvariantViolation::new(
            "A turn adds exactly one move to the history",
        )]);
    }
    Ok(())
}

/// Contract for the human's move.
///
/// Preconditions:
/// - It is the human's turn
/// - The index is on the board and its square is empty
///
/// Postconditions:
/// - All turn invariants hold
/// - Exactly one move was added
pub struct HumanMoveContract;

impl Contract<GameState, usize> for HumanMoveContract {
    fn pre(state: &GameState, index: &usize) -> Result<(), MoveError> {
        PhaseAllows::check(state, Phase::HumanTurn)?;
        LegalPlacement::check(state.board(), *index)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        one_move_later(before, after)
    }
}

/// Contract for the opponent's move. Same shape as [`HumanMoveContract`]
/// with the opponent's phase.
pub struct OpponentMoveContract;

impl Contract<GameState, usize> for OpponentMoveContract {
    fn pre(state: &GameState, index: &usize) -> Result<(), MoveError> {
        PhaseAllows::check(state, Phase::OpponentTurn)?;
        LegalPlacement::check(state.board(), *index)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        one_move_later(before, after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Outcome};

    #[test]
    fn test_precondition_empty_square() {
        let state = GameState::new(Mark::X);
        assert!(HumanMoveContract::pre(&state, &4).is_ok());
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let state = GameState::new(Mark::X);
        assert_eq!(
            HumanMoveContract::pre(&state, &42),
            Err(MoveError::InvalidMove(InvalidMove::OutOfBounds(42)))
        );
    }

    #[test]
    fn test_precondition_occupied_square() {
        let state = GameState::new(Mark::X).play_human(4).unwrap();
        assert_eq!(
            OpponentMoveContract::pre(&state, &4),
            Err(MoveError::InvalidMove(InvalidMove::SquareOccupied(
                Position::Center
            )))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let state = GameState::new(Mark::X);
        assert_eq!(
            OpponentMoveContract::pre(&state, &0),
            Err(MoveError::InvalidMove(InvalidMove::OutOfTurn(
                Phase::HumanTurn
            )))
        );
    }

    #[test]
    fn test_precondition_game_over() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        let state = GameState::from_position(board, Mark::X, Mark::O).unwrap();
        assert_eq!(state.phase(), Phase::Terminal(Outcome::Winner(Mark::X)));
        assert_eq!(
            HumanMoveContract::pre(&state, &8),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::new(Mark::X);
        let after = before.play_human(0).unwrap();
        assert!(HumanMoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_skipped_move() {
        let before = GameState::new(Mark::X);
        assert!(HumanMoveContract::post(&before, &before).is_err());
    }
}
