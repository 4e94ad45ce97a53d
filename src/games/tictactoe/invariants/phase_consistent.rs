//! Phase consistency invariant: the phase agrees with the board.

use super::super::rules::{is_full, is_win, winner};
use super::super::{GameState, Outcome, Phase};
use super::Invariant;

/// Invariant: a game is terminal exactly when its board is decided, and the
/// recorded outcome matches the board.
pub struct PhaseConsistentInvariant;

impl Invariant<GameState> for PhaseConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        match state.phase() {
            Phase::Terminal(Outcome::Winner(mark)) => is_win(board, mark),
            Phase::Terminal(Outcome::Draw) => is_full(board) && winner(board).is_none(),
            Phase::HumanTurn | Phase::OpponentTurn => {
                !is_full(board) && winner(board).is_none()
            }
        }
    }

    fn description() -> &'static str {
        "Phase agrees with the board's win and draw state"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_fresh_game_holds() {
        assert!(PhaseConsistentInvariant::holds(&GameState::new(Mark::O)));
    }

    #[test]
    fn test_terminal_without_line_violates() {
        let mut state = GameState::replay(Mark::X, &[4]).unwrap();
        state.phase = Phase::Terminal(Outcome::Winner(Mark::X));
        assert!(!PhaseConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_won_game_holds() {
        // X: 0, 1, 2 with O answering 3, 4.
        let state = GameState::replay(Mark::X, &[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(state.phase(), Phase::Terminal(Outcome::Winner(Mark::X)));
        assert!(PhaseConsistentInvariant::holds(&state));
    }
}
