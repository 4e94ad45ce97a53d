//! Tictac Engine - tic-tac-toe against a heuristic opponent
//!
//! A small rule engine plus an explicit turn state machine. A UI (or the
//! bundled `tictac` binary) owns the [`GameState`] and drives it:
//!
//! 1. [`TurnEngine::submit_move`] with the human's square
//! 2. [`TurnEngine::advance`] if the game is not over
//! 3. [`TurnEngine::reset`] for a new game
//!
//! # Architecture
//!
//! - **Board**: pure queries over a 3x3 grid (win, draw, free squares)
//! - **Policy**: the fixed-priority heuristic that picks the opponent's move
//! - **TurnEngine**: `HumanTurn -> OpponentTurn -> ... -> Terminal`
//! - **Session**: many independent games behind one handle
//!
//! # Example
//!
//! ```
//! use tictac_engine::{HeuristicOpponent, Mark, Phase, TurnEngine};
//!
//! let mut engine = TurnEngine::new(Mark::X, HeuristicOpponent::seeded(42));
//! let state = engine.reset();
//! let state = engine.submit_move(&state, 4)?;
//! assert_eq!(state.phase(), Phase::OpponentTurn);
//! let state = engine.advance(&state)?;
//! assert_eq!(state.phase(), Phase::HumanTurn);
//! # Ok::<(), tictac_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;
mod simulation;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig, SparringKind};

// Crate-level exports - Session management
pub use session::{SessionError, SessionId, SessionManager};

// Crate-level exports - Simulation
pub use simulation::{SimulationReport, play_out, simulate};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BalancedMarksInvariant, Board, BoardParseError, Contract, Decision, FirstAvailable, GameState,
    HeuristicOpponent, HumanMoveContract, InBounds, InconsistentState, Invariant, InvariantSet,
    InvariantViolation, InvalidMove, LegalPlacement, Mark, MonotonicBoardInvariant, Move,
    MoveError, MovePolicy, OpponentMoveContract, Outcome, Phase, PhaseAllows,
    PhaseConsistentInvariant, Position, RandomMover, Rule, Square, SquareIsEmpty, TurnEngine,
    TurnInvariants, winning_moves,
};

// Crate-level exports - Rule checks
pub use games::tictactoe::rules::{LINES, is_draw, is_full, is_win, winner};
