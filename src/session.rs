//! Hosting many independent games.
//!
//! Each session owns its [`GameState`] and its own seeded engine. Sessions
//! share nothing but the map that holds them.

use crate::games::tictactoe::{GameState, HeuristicOpponent, Mark, MoveError, TurnEngine};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Error from a session operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No session with this ID.
    #[display("Session {} not found", _0)]
    NotFound(SessionId),

    /// A session with this ID already exists.
    #[display("Session {} already exists", _0)]
    AlreadyExists(SessionId),

    /// Another thread panicked while holding the session map.
    #[display("Session map lock poisoned")]
    LockPoisoned,

    /// The game rejected the operation.
    #[display("{}", _0)]
    Move(MoveError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

/// One hosted game.
#[derive(Debug, Clone)]
struct GameSession {
    state: GameState,
    engine: TurnEngine<HeuristicOpponent>,
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    human: Mark,
    seed: Option<u64>,
}

impl SessionManager {
    /// Creates a session manager whose games give the human `human`.
    ///
    /// With a seed, each session's opponent is seeded from it and the
    /// session ID, so the same ID replays the same tie-breaks.
    #[instrument]
    pub fn new(human: Mark, seed: Option<u64>) -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            human,
            seed,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, GameSession>>, SessionError> {
        self.sessions.lock().map_err(|_| {
            warn!("Session map lock poisoned");
            SessionError::LockPoisoned
        })
    }

    fn opponent_for(&self, id: &str) -> HeuristicOpponent {
        match self.seed {
            Some(seed) => {
                let mut hasher = DefaultHasher::new();
                seed.hash(&mut hasher);
                id.hash(&mut hasher);
                HeuristicOpponent::seeded(hasher.finish())
            }
            None => HeuristicOpponent::from_entropy(),
        }
    }

    /// Creates a new game session and returns its opening state.
    #[instrument(skip(self))]
    pub fn create_session(
        &self,
        id: impl Into<SessionId> + std::fmt::Debug,
    ) -> Result<GameState, SessionError> {
        let id = id.into();
        let mut sessions = self.lock()?;

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists(id));
        }

        let engine = TurnEngine::new(self.human, self.opponent_for(&id));
        let state = engine.reset();
        sessions.insert(
            id.clone(),
            GameSession {
                state: state.clone(),
                engine,
            },
        );

        info!(session_id = %id, "Created new session");
        Ok(state)
    }

    /// Returns a snapshot of a session's state.
    #[instrument(skip(self))]
    pub fn get_state(&self, id: &str) -> Result<GameState, SessionError> {
        let sessions = self.lock()?;
        sessions
            .get(id)
            .map(|s| s.state.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Runs `op` against one session and stores the state it returns.
    ///
    /// On error the stored state is left as it was.
    fn update<F>(&self, id: &str, op: F) -> Result<GameState, SessionError>
    where
        F: FnOnce(&mut GameSession) -> Result<GameState, MoveError>,
    {
        let mut sessions = self.lock()?;
        let session = sessions.get_mut(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::NotFound(id.to_string())
        })?;

        let next = op(&mut *session).map_err(|e| {
            warn!(session_id = id, error = %e, "Operation rejected");
            e
        })?;
        session.state = next.clone();
        Ok(next)
    }

    /// Applies the human's move in a session.
    #[instrument(skip(self))]
    pub fn submit_move(&self, id: &str, index: usize) -> Result<GameState, SessionError> {
        self.update(id, |s| s.engine.submit_move(&s.state, index))
    }

    /// Plays the opponent's move in a session.
    #[instrument(skip(self))]
    pub fn advance(&self, id: &str) -> Result<GameState, SessionError> {
        self.update(id, |s| s.engine.advance(&s.state))
    }

    /// Starts a fresh game in an existing session.
    #[instrument(skip(self))]
    pub fn reset(&self, id: &str) -> Result<GameState, SessionError> {
        self.update(id, |s| Ok(s.engine.reset()))
    }

    /// Removes a session.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        if sessions.remove(id).is_none() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        info!(session_id = id, "Removed session");
        Ok(())
    }

    /// Lists all session IDs, sorted.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        let sessions = self.lock()?;
        let mut ids: Vec<_> = sessions.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Mark::X, None)
    }
}
