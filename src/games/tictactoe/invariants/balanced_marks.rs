//! Balanced marks invariant: turns alternate, so counts stay close.

use super::super::{GameState, Phase};
use super::Invariant;

/// Invariant: the two marks' counts differ by at most one, and while the
/// game is live the side to move is never ahead.
pub struct BalancedMarksInvariant;

impl Invariant<GameState> for BalancedMarksInvariant {
    fn holds(state: &GameState) -> bool {
        let human = state.board().count(state.human());
        let opponent = state.board().count(state.opponent());
        if human.abs_diff(opponent) > 1 {
            return false;
        }

        match state.phase() {
            Phase::HumanTurn => human <= opponent,
            Phase::OpponentTurn => opponent <= human,
            Phase::Terminal(_) => true,
        }
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one and the side to move is not ahead"
    }
}
