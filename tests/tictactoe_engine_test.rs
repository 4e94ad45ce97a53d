//! Tests for the turn engine state machine.

use tictac_engine::{
    Board, FirstAvailable, GameState, HeuristicOpponent, InvalidMove, Mark, MoveError, Outcome,
    Phase, Position, Square, TurnEngine,
};

fn engine() -> TurnEngine<HeuristicOpponent> {
    TurnEngine::new(Mark::X, HeuristicOpponent::seeded(42))
}

#[test]
fn test_center_opening_hands_turn_to_opponent() {
    let engine = engine();
    let state = engine.reset();
    assert_eq!(state.phase(), Phase::HumanTurn);

    let state = engine.submit_move(&state, 4).expect("Valid move");

    assert_eq!(state.phase(), Phase::OpponentTurn);
    let expected: Board = ".../.X./...".parse().unwrap();
    assert_eq!(state.board(), &expected);
    assert_eq!(state.board().get(Position::Center), Square::Occupied(Mark::X));
    assert_eq!(state.board().occupied(), 1);
    assert_eq!(state.outcome(), None);
}

#[test]
fn test_opponent_completes_its_row() {
    let mut engine = TurnEngine::new(Mark::X, HeuristicOpponent::seeded(1));
    let board: Board = "OO./XX./...".parse().unwrap();
    let state = GameState::from_position(board, Mark::X, Mark::O).unwrap();
    assert_eq!(state.phase(), Phase::OpponentTurn);

    let state = engine.advance(&state).expect("Opponent can move");

    let expected: Board = "OOO/XX./...".parse().unwrap();
    assert_eq!(state.board(), &expected);
    assert_eq!(state.phase(), Phase::Terminal(Outcome::Winner(Mark::O)));
    assert_eq!(state.winner(), Some(Mark::O));
}

#[test]
fn test_human_completes_diagonal() {
    let engine = engine();
    // X: 0, 4 with O scripted at 1, 2.
    let state = GameState::replay(Mark::X, &[0, 1, 4, 2]).unwrap();
    assert_eq!(state.phase(), Phase::HumanTurn);

    let state = engine.submit_move(&state, 8).unwrap();
    assert_eq!(state.phase(), Phase::Terminal(Outcome::Winner(Mark::X)));
    assert_eq!(state.status_message(), "Player X wins!");
}

#[test]
fn test_full_board_without_line_is_draw() {
    let engine = engine();
    let state = GameState::replay(Mark::X, &[0, 1, 2, 4, 3, 5, 7, 6]).unwrap();
    assert_eq!(state.phase(), Phase::HumanTurn);

    let state = engine.submit_move(&state, 8).unwrap();
    assert_eq!(state.phase(), Phase::Terminal(Outcome::Draw));
    assert!(state.available_moves().is_empty());
    assert_eq!(state.winner(), None);
}

#[test]
fn test_reset_from_any_terminal_state() {
    let engine = engine();
    let won = GameState::replay(Mark::X, &[0, 3, 1, 4, 2]).unwrap();
    let lost = GameState::replay(Mark::X, &[0, 3, 1, 4, 8, 5]).unwrap();
    let drawn = GameState::replay(Mark::X, &[0, 1, 2, 4, 3, 5, 7, 6, 8]).unwrap();

    for terminal in [won, lost, drawn] {
        assert!(terminal.is_terminal());
        let fresh = engine.reset();
        assert_eq!(fresh.phase(), Phase::HumanTurn);
        assert_eq!(fresh.board(), &Board::new());
        assert!(fresh.history().is_empty());
    }
}

#[test]
fn test_terminal_rejects_moves() {
    let mut engine = engine();
    let state = GameState::replay(Mark::X, &[0, 3, 1, 4, 8, 5]).unwrap();
    assert_eq!(state.winner(), Some(Mark::O));

    assert_eq!(engine.submit_move(&state, 2), Err(MoveError::GameOver));
    assert_eq!(engine.advance(&state), Err(MoveError::GameOver));
}

#[test]
fn test_rejected_move_leaves_state_unchanged() {
    let engine = engine();
    let state = engine.submit_move(&engine.reset(), 4).unwrap();
    let snapshot = state.clone();

    let err = engine.submit_move(&state, 4).unwrap_err();
    assert_eq!(err, MoveError::InvalidMove(InvalidMove::OutOfTurn(Phase::OpponentTurn)));
    assert_eq!(state, snapshot);
}

#[test]
fn test_out_of_range_and_occupied() {
    let mut engine = engine();
    let state = engine.play_turn(&engine.reset(), 0).unwrap();
    assert_eq!(state.phase(), Phase::HumanTurn);

    assert_eq!(
        engine.submit_move(&state, 9),
        Err(MoveError::InvalidMove(InvalidMove::OutOfBounds(9)))
    );
    assert_eq!(
        engine.submit_move(&state, 0),
        Err(MoveError::InvalidMove(InvalidMove::SquareOccupied(Position::TopLeft)))
    );
}

#[test]
fn test_human_plays_o() {
    let mut engine = TurnEngine::new(Mark::O, FirstAvailable);
    let state = engine.reset();
    assert_eq!(state.status_message(), "Your turn (O)!");

    let state = engine.play_turn(&state, 4).unwrap();
    assert_eq!(state.board().get(Position::Center), Square::Occupied(Mark::O));
    assert_eq!(state.board().get(Position::TopLeft), Square::Occupied(Mark::X));
}

#[test]
fn test_state_serializes() {
    let state = GameState::replay(Mark::X, &[4, 0]).unwrap();
    let json = serde_json::to_string(&state).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn test_tampered_snapshot_rejected() {
    let state = GameState::replay(Mark::X, &[0, 3, 1, 4, 2]).unwrap();
    assert_eq!(state.winner(), Some(Mark::X));

    let json = serde_json::to_string(&state).unwrap();
    let tampered = json.replace(r#"{"Terminal":{"Winner":"X"}}"#, r#""HumanTurn""#);
    assert_ne!(tampered, json);
    assert!(serde_json::from_str::<GameState>(&tampered).is_err());
}

#[test]
fn test_resume_rejects_side_already_ahead() {
    let board: Board = ".O./.../...".parse().unwrap();
    assert!(GameState::from_position(board, Mark::X, Mark::O).is_none());

    let board: Board = "X../.../...".parse().unwrap();
    assert!(GameState::from_position(board, Mark::X, Mark::X).is_none());
}
