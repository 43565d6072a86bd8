use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{CareerSession, SessionId};

/// Storage abstraction so the guidance service can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<CareerSession>, SessionError>;
    fn save(&self, session: CareerSession) -> Result<(), SessionError>;
    /// Returns whether a session was actually removed.
    fn remove(&self, id: &SessionId) -> Result<bool, SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session id '{0}'")]
    InvalidId(String),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store. Sessions are cloned in and out, so no two callers ever hold the
/// same model mutably.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, CareerSession>>>,
}

impl InMemorySessionRepository {
    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, CareerSession>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))
    }

    pub fn len(&self) -> usize {
        self.sessions().map(|sessions| sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn load(&self, id: &SessionId) -> Result<Option<CareerSession>, SessionError> {
        Ok(self.sessions()?.get(id).cloned())
    }

    fn save(&self, session: CareerSession) -> Result<(), SessionError> {
        self.sessions()?.insert(session.id.clone(), session);
        Ok(())
    }

    fn remove(&self, id: &SessionId) -> Result<bool, SessionError> {
        Ok(self.sessions()?.remove(id).is_some())
    }
}
