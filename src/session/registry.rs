//! Live-session registry.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::SessionId;
use crate::error::{Error, Result};

/// Attach-time facts about a session, kept for logs and the info
/// endpoint.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: SessionId,
    /// Terminal type reported by the client (e.g. `xterm-256color`).
    pub term: String,
    pub width: u16,
    pub height: u16,
    pub connected_at: Instant,
}

impl SessionInfo {
    /// How long this session has been attached.
    pub fn connected_for(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

/// Thread-safe registry of currently attached sessions.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionInfo>>,
}

impl SessionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Record a freshly attached session.
    pub fn insert(&self, info: SessionInfo) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(|_| Error::LockPoisoned)?;
        sessions.insert(info.id, info);
        Ok(())
    }

    /// Get a clone of the info for the given session.
    pub fn get(&self, id: &SessionId) -> Result<Option<SessionInfo>> {
        let sessions = self.sessions.read().map_err(|_| Error::LockPoisoned)?;
        Ok(sessions.get(id).cloned())
    }

    /// Drop a session from the registry, returning its info if present.
    pub fn remove(&self, id: &SessionId) -> Result<Option<SessionInfo>> {
        let mut sessions = self.sessions.write().map_err(|_| Error::LockPoisoned)?;
        Ok(sessions.remove(id))
    }

    /// Number of currently attached sessions.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Snapshot of all attached sessions.
    pub fn list(&self) -> Result<Vec<SessionInfo>> {
        let sessions = self.sessions.read().map_err(|_| Error::LockPoisoned)?;
        Ok(sessions.values().cloned().collect())
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
