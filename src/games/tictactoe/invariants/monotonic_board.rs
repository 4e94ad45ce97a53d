//! Monotonic board invariant: squares never change once set.

use super::super::{Board, GameState, Square};
use super::Invariant;

/// Invariant: replaying the move history reproduces the board.
///
/// Every move lands on an empty square, and no square is filled without a
/// recorded move.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();

        for mov in state.history() {
            if reconstructed.get(mov.position) != Square::Empty {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.mark));
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Move history replays to the current board"
    }
}
