//! Rule checks for tic-tac-toe.
//!
//! All checks are pure functions of a [`Board`](super::Board).

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, is_win, winner};
