//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::contracts::LegalPlacement;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Mark placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X.
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values. Every mutation that callers can reach goes
/// through [`Board::place`], which returns a new board and leaves the receiver
/// untouched, so hypothetical moves can be simulated freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Empty positions in ascending index order.
    pub fn available_moves(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidMove`] if `index` is outside `0..9` or the
    /// square is already occupied. `self` is never modified.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        let pos = LegalPlacement::check(self, index)?;
        let mut next = *self;
        next.set(pos, Square::Occupied(mark));
        Ok(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Empty squares show their 1-based cell number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The string did not hold exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(usize),

    /// A character that is neither a mark nor an empty marker.
    #[display("Unexpected character {:?} in board", _0)]
    InvalidChar(char),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine squares in row-major order.
    ///
    /// `X`/`O` (any case) are marks, `.`, `_` and `-` are empty squares.
    /// Whitespace, `|` and `/` are ignored so `"XO./.X./..O"` works.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars() {
            let square = match c {
                'x' | 'X' => Square::Occupied(Mark::X),
                'o' | 'O' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                '|' | '/' => continue,
                c if c.is_whitespace() => continue,
                other => return Err(BoardParseError::InvalidChar(other)),
            };
            squares.push(square);
        }

        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::InvalidMove;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied(), 0);
        assert_eq!(board.available_moves().len(), 9);
    }

    #[test]
    fn test_place_returns_new_board() {
        let board = Board::new();
        let next = board.place(4, Mark::X).unwrap();

        assert_eq!(next.get(Position::Center), Square::Occupied(Mark::X));
        assert_eq!(board.get(Position::Center), Square::Empty);
    }

    #[test]
    fn test_place_twice_rejected() {
        let board = Board::new().place(0, Mark::O).unwrap();
        let result = board.place(0, Mark::X);

        assert_eq!(
            result,
            Err(MoveError::InvalidMove(InvalidMove::SquareOccupied(
                Position::TopLeft
            )))
        );
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Mark::O));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let result = Board::new().place(9, Mark::X);
        assert_eq!(
            result,
            Err(MoveError::InvalidMove(InvalidMove::OutOfBounds(9)))
        );
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "XO./.X./..O".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Mark::X));
        assert_eq!(board.get(Position::TopCenter), Square::Occupied(Mark::O));
        assert_eq!(board.get(Position::Center), Square::Occupied(Mark::X));
        assert_eq!(board.get(Position::BottomRight), Square::Occupied(Mark::O));
        assert_eq!(board.occupied(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength(2))
        );
        assert_eq!(
            "XO.Z.....".parse::<Board>(),
            Err(BoardParseError::InvalidChar('Z'))
        );
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let board: Board = "X...O...X".parse().unwrap();
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|X");
    }

    #[test]
    fn test_mark_parses_case_insensitive() {
        assert_eq!("o".parse::<Mark>().unwrap(), Mark::O);
        assert_eq!("X".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }
}
