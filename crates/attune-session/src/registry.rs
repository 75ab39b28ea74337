//! Per-session engine registry

use std::collections::HashMap;
use std::sync::Arc;

use attune_core::{AttuneError, AttuneResult, SharedClock};
use parking_lot::{Mutex, RwLock};

use crate::engine::SessionEngine;
use crate::feedback::FeedbackData;

/// Handle to one session's engine.
pub type SharedEngine = Arc<Mutex<SessionEngine>>;

/// Owns every live engine, one per session id.
///
/// Engines assume a single writer; the per-session mutex in the handle is
/// what serializes callers. The registry itself holds no other mutable
/// state.
pub struct SessionRegistry {
    clock: SharedClock,
    sessions: RwLock<HashMap<String, SharedEngine>>,
}

impl SessionRegistry {
    pub fn new(clock: SharedClock) -> Self {
        SessionRegistry {
            clock,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create and register an engine for `session_id`.
    pub fn open(&self, session_id: &str, feedback: FeedbackData) -> AttuneResult<SharedEngine> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(session_id) {
            return Err(AttuneError::SessionExists(session_id.to_string()));
        }

        let engine = Arc::new(Mutex::new(SessionEngine::new(feedback, self.clock.clone())));
        sessions.insert(session_id.to_string(), engine.clone());
        Ok(engine)
    }

    pub fn get(&self, session_id: &str) -> AttuneResult<SharedEngine> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| AttuneError::SessionNotFound(session_id.to_string()))
    }

    /// Remove the session, returning its engine for a final summary.
    pub fn close(&self, session_id: &str) -> AttuneResult<SharedEngine> {
        self.sessions
            .write()
            .remove(session_id)
            .ok_or_else(|| AttuneError::SessionNotFound(session_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}
