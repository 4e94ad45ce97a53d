//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(level = "trace", skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Checks for a draw.
///
/// A board can be full and won at the same time. Callers check
/// [`is_win`](super::is_win) for both marks first; this only answers
/// whether any square is left.
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
}

#[cfg(test)]
mod tests {
    use super::super::win::winner;
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board: Board = "....X....".parse().unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        assert!(is_draw(&board));
        assert_eq!(winner(&board), None);
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_full_board_can_also_be_won() {
        // X wins the top row on the last move.
        let board: Board = "XXX/OOX/XOO".parse().unwrap();
        assert!(is_full(&board));
        assert!(winner(&board).is_some());
    }
}
