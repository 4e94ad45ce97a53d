//! Turn engine for a game against the heuristic opponent.
//!
//! State is threaded explicitly: every operation borrows a [`GameState`] and
//! returns a new one. A failed operation hands back an error and the caller
//! keeps the state it already had.
//!
//! ```text
//! HumanTurn ──submit_move──▶ OpponentTurn ──advance──▶ HumanTurn
//!     │                           │
//!     └──── win / full board ─────┴──▶ Terminal(outcome) ──reset──▶ HumanTurn
//! ```

use super::action::{Move, MoveError};
use super::contracts::{Contract, HumanMoveContract, OpponentMoveContract, PhaseAllows};
use super::invariants::{InvariantSet, InvariantViolation, TurnInvariants};
use super::phases::{Outcome, Phase};
use super::policy::MovePolicy;
use super::rules::{is_draw, is_win, winner};
use super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Game State
// ─────────────────────────────────────────────────────────────

/// Complete state of one game.
///
/// Deserializing checks the same invariants every move preserves, so a
/// snapshot that live play could not have produced is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    pub(crate) board: Board,
    human: Mark,
    opponent: Mark,
    pub(crate) phase: Phase,
    pub(crate) history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh game: empty board, human to move.
    pub fn new(human: Mark) -> Self {
        Self {
            board: Board::new(),
            human,
            opponent: human.opponent(),
            phase: Phase::HumanTurn,
            history: Vec::new(),
        }
    }

    /// Resumes from an arbitrary position with `to_move` to play.
    ///
    /// A board that is already won or full comes back terminal. The history
    /// of a resumed game lists the pre-placed marks in index order. Returns
    /// `None` if the mark counts differ by more than one, or if `to_move`
    /// already has more marks than the other side.
    #[instrument(skip(board))]
    pub fn from_position(board: Board, human: Mark, to_move: Mark) -> Option<Self> {
        let history = Position::ALL
            .iter()
            .filter_map(|&pos| match board.get(pos) {
                Square::Occupied(mark) => Some(Move::new(mark, pos)),
                Square::Empty => None,
            })
            .collect();

        let phase = match winner(&board) {
            Some(mark) => Phase::Terminal(Outcome::Winner(mark)),
            None if is_draw(&board) => Phase::Terminal(Outcome::Draw),
            None if to_move == human => Phase::HumanTurn,
            None => Phase::OpponentTurn,
        };

        let state = Self {
            board,
            human,
            opponent: human.opponent(),
            phase,
            history,
        };

        match TurnInvariants::check_all(&state) {
            Ok(()) => Some(state),
            Err(violations) => {
                debug!(?violations, "Rejected position");
                None
            }
        }
    }

    /// Rebuilds a game by playing `indices` alternately, human first.
    ///
    /// Every move goes through the same checks as live play, so an illegal
    /// sequence fails with the error the offending move would have raised.
    #[instrument]
    pub fn replay(human: Mark, indices: &[usize]) -> Result<Self, MoveError> {
        let mut state = Self::new(human);
        for &index in indices {
            state = match state.phase {
                Phase::OpponentTurn => state.play_opponent(index)?,
                Phase::HumanTurn | Phase::Terminal(_) => state.play_human(index)?,
            };
        }
        Ok(state)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// The opponent's mark.
    pub fn opponent(&self) -> Mark {
        self.opponent
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true once the game is decided.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The outcome, if the game is decided.
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    /// The winning mark, if someone won.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome().and_then(|o| o.winner())
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Empty positions in ascending order.
    pub fn available_moves(&self) -> Vec<Position> {
        self.board.available_moves()
    }

    /// One-line status for display.
    pub fn status_message(&self) -> String {
        match self.phase {
            Phase::HumanTurn => format!("Your turn ({})!", self.human),
            Phase::OpponentTurn => format!("Opponent ({}) is thinking...", self.opponent),
            Phase::Terminal(Outcome::Winner(mark)) if mark == self.human => {
                format!("Player {} wins!", mark)
            }
            Phase::Terminal(Outcome::Winner(mark)) => format!("Opponent ({}) wins!", mark),
            Phase::Terminal(Outcome::Draw) => "It's a draw!".to_string(),
        }
    }

    /// Plays the human's mark at `index`.
    ///
    /// # Errors
    ///
    /// - `GameOver` if the game is decided
    /// - `InvalidMove` if it is not the human's turn, or `index` is off the
    ///   board or occupied
    #[instrument(skip(self), fields(mark = %self.human))]
    pub fn play_human(&self, index: usize) -> Result<Self, MoveError> {
        HumanMoveContract::pre(self, &index)?;
        let next = self.apply(index, self.human, Phase::OpponentTurn)?;

        #[cfg(debug_assertions)]
        if let Err(violations) = HumanMoveContract::post(self, &next) {
            panic!("Human move broke invariants: {:?}", violations);
        }

        Ok(next)
    }

    /// Plays the opponent's mark at `index`.
    ///
    /// The turn engine calls this with its policy's choice. It is public so
    /// replays and tests can script the opponent.
    #[instrument(skip(self), fields(mark = %self.opponent))]
    pub fn play_opponent(&self, index: usize) -> Result<Self, MoveError> {
        OpponentMoveContract::pre(self, &index)?;
        let next = self.apply(index, self.opponent, Phase::HumanTurn)?;

        #[cfg(debug_assertions)]
        if let Err(violations) = OpponentMoveContract::post(self, &next) {
            panic!("Opponent move broke invariants: {:?}", violations);
        }

        Ok(next)
    }

    /// Places `mark`, then decides the next phase: a win for `mark`, a draw,
    /// or `next_turn`.
    fn apply(&self, index: usize, mark: Mark, next_turn: Phase) -> Result<Self, MoveError> {
        let board = self.board.place(index, mark)?;
        let mut next = self.clone();
        next.board = board;
        next.history.push(Move::new(mark, Position::ALL[index]));

        next.phase = if is_win(&next.board, mark) {
            info!(%mark, "Game won");
            Phase::Terminal(Outcome::Winner(mark))
        } else if is_draw(&next.board) {
            info!("Game drawn");
            Phase::Terminal(Outcome::Draw)
        } else {
            next_turn
        };

        debug!(index, phase = %next.phase, "Move applied");
        Ok(next)
    }
}

/// Wire form of [`GameState`], checked before it becomes one.
#[derive(Deserialize)]
struct GameStateRepr {
    board: Board,
    human: Mark,
    opponent: Mark,
    phase: Phase,
    history: Vec<Move>,
}

/// A snapshot that breaks one or more game-state invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistentState {
    /// Every invariant the snapshot breaks.
    pub violations: Vec<InvariantViolation>,
}

impl fmt::Display for InconsistentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inconsistent game state:")?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { " " } else { "; " };
            write!(f, "{}{}", sep, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for InconsistentState {}

impl TryFrom<GameStateRepr> for GameState {
    type Error = InconsistentState;

    fn try_from(repr: GameStateRepr) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();
        if repr.opponent != repr.human.opponent() {
            violations.push(InvariantViolation::new("Opponent plays the other mark"));
        }

        let state = Self {
            board: repr.board,
            human: repr.human,
            opponent: repr.opponent,
            phase: repr.phase,
            history: repr.history,
        };

        if let Err(broken) = TurnInvariants::check_all(&state) {
            violations.extend(broken);
        }

        if violations.is_empty() {
            Ok(state)
        } else {
            warn!(?violations, "Rejected game state snapshot");
            Err(InconsistentState { violations })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Turn Engine
// ─────────────────────────────────────────────────────────────

/// Drives games between a human and a [`MovePolicy`].
///
/// The engine owns the policy (and with it any random source) but no game
/// state; callers keep the [`GameState`] and pass it in.
#[derive(Debug, Clone)]
pub struct TurnEngine<P> {
    human: Mark,
    policy: P,
}

impl<P: MovePolicy> TurnEngine<P> {
    /// Creates an engine whose games give the human `human`.
    pub fn new(human: Mark, policy: P) -> Self {
        Self { human, policy }
    }

    /// The human's mark in games this engine starts.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// Returns the policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Starts a new game.
    #[instrument(skip(self), fields(human = %self.human))]
    pub fn reset(&self) -> GameState {
        info!("New game");
        GameState::new(self.human)
    }

    /// Applies the human's move at `index`.
    #[instrument(skip(self, state))]
    pub fn submit_move(&self, state: &GameState, index: usize) -> Result<GameState, MoveError> {
        state.play_human(index)
    }

    /// Lets the policy play the opponent's move.
    ///
    /// # Errors
    ///
    /// - `GameOver` if the game is decided
    /// - `InvalidMove` if it is the human's turn
    /// - `NoMoveAvailable` if the board is full
    #[instrument(skip(self, state), fields(policy = self.policy.name()))]
    pub fn advance(&mut self, state: &GameState) -> Result<GameState, MoveError> {
        PhaseAllows::check(state, Phase::OpponentTurn)?;
        let pos = self
            .policy
            .choose(state.board(), state.opponent(), state.human())?;
        debug!(position = %pos, "Policy chose move");
        state.play_opponent(pos.to_index())
    }

    /// Submits the human's move and, if the game goes on, answers it.
    pub fn play_turn(&mut self, state: &GameState, index: usize) -> Result<GameState, MoveError> {
        let next = self.submit_move(state, index)?;
        if next.phase() == Phase::OpponentTurn {
            self.advance(&next)
        } else {
            Ok(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{FirstAvailable, InvalidMove};

    fn engine() -> TurnEngine<FirstAvailable> {
        TurnEngine::new(Mark::X, FirstAvailable)
    }

    #[test]
    fn test_submit_moves_to_opponent_turn() {
        let engine = engine();
        let state = engine.reset();
        let next = engine.submit_move(&state, 4).unwrap();

        assert_eq!(next.phase(), Phase::OpponentTurn);
        assert_eq!(next.board().get(Position::Center), Square::Occupied(Mark::X));
        assert_eq!(state.board().occupied(), 0);
    }

    #[test]
    fn test_advance_returns_to_human() {
        let mut engine = engine();
        let state = engine.submit_move(&engine.reset(), 4).unwrap();
        let next = engine.advance(&state).unwrap();

        assert_eq!(next.phase(), Phase::HumanTurn);
        assert_eq!(next.board().count(Mark::O), 1);
    }

    #[test]
    fn test_advance_on_human_turn_rejected() {
        let mut engine = engine();
        let state = engine.reset();
        assert_eq!(
            engine.advance(&state),
            Err(MoveError::InvalidMove(InvalidMove::OutOfTurn(Phase::HumanTurn)))
        );
    }

    #[test]
    fn test_submit_twice_rejected() {
        let engine = engine();
        let state = engine.submit_move(&engine.reset(), 0).unwrap();
        assert_eq!(
            engine.submit_move(&state, 1),
            Err(MoveError::InvalidMove(InvalidMove::OutOfTurn(Phase::OpponentTurn)))
        );
    }

    #[test]
    fn test_terminal_rejects_everything_but_reset() {
        let mut engine = engine();
        let state = GameState::replay(Mark::X, &[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(state.winner(), Some(Mark::X));

        assert_eq!(engine.submit_move(&state, 8), Err(MoveError::GameOver));
        assert_eq!(engine.advance(&state), Err(MoveError::GameOver));

        let fresh = engine.reset();
        assert_eq!(fresh.phase(), Phase::HumanTurn);
        assert!(fresh.history().is_empty());
    }

    #[test]
    fn test_status_messages() {
        let state = GameState::new(Mark::X);
        assert_eq!(state.status_message(), "Your turn (X)!");

        let state = state.play_human(0).unwrap();
        assert_eq!(state.status_message(), "Opponent (O) is thinking...");

        let draw: Board = "XOX/OXX/OXO".parse().unwrap();
        let state = GameState::from_position(draw, Mark::X, Mark::O).unwrap();
        assert_eq!(state.status_message(), "It's a draw!");
    }

    #[test]
    fn test_snapshot_round_trips() {
        let state = GameState::replay(Mark::O, &[4, 0, 8]).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_snapshot_with_live_phase_on_won_board_rejected() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        let mut state = GameState::from_position(board, Mark::X, Mark::O).unwrap();
        state.phase = Phase::HumanTurn;

        let json = serde_json::to_string(&state).unwrap();
        let err = serde_json::from_str::<GameState>(&json).unwrap_err();
        assert!(err.to_string().contains("Phase agrees with the board"));
    }

    #[test]
    fn test_snapshot_with_mover_ahead_rejected() {
        let mut state = GameState::replay(Mark::X, &[4]).unwrap();
        state.phase = Phase::HumanTurn;

        let json = serde_json::to_string(&state).unwrap();
        assert!(serde_json::from_str::<GameState>(&json).is_err());
    }

    #[test]
    fn test_snapshot_with_same_marks_rejected() {
        let mut state = GameState::new(Mark::X);
        state.opponent = Mark::X;

        let json = serde_json::to_string(&state).unwrap();
        let err = serde_json::from_str::<GameState>(&json).unwrap_err();
        assert!(err.to_string().contains("Opponent plays the other mark"));
    }

    #[test]
    fn test_resumed_positions_never_break_moves() {
        let mut engine = engine();
        let board: Board = ".O./.../...".parse().unwrap();
        assert!(GameState::from_position(board, Mark::X, Mark::O).is_none());

        let state = GameState::from_position(board, Mark::X, Mark::X).unwrap();
        let state = engine.submit_move(&state, 8).unwrap();
        let state = engine.advance(&state).unwrap();
        assert_eq!(state.phase(), Phase::HumanTurn);
        assert_eq!(state.board().count(Mark::X), 1);
        assert_eq!(state.board().count(Mark::O), 2);
    }

    #[test]
    fn test_play_turn_answers_human() {
        let mut engine = engine();
        let state = engine.play_turn(&engine.reset(), 4).unwrap();
        assert_eq!(state.phase(), Phase::HumanTurn);
        assert_eq!(state.history().len(), 2);
    }
}
