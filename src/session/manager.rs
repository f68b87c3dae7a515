//! Session manager: one isolated task per attached session.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::registry::{SessionInfo, SessionRegistry};
use super::{runner, SessionHandle, SessionId};
use crate::store::PasteStore;

/// Accepts session handles from the transport and runs each one on its
/// own task.
///
/// Sessions share nothing with each other except the paste store, which
/// is safe for concurrent use. A failing session is logged and closed;
/// it can never take down a sibling session or the process.
pub struct SessionManager {
    store: Arc<dyn PasteStore>,
    registry: Arc<SessionRegistry>,
}

impl SessionManager {
    /// Create a manager over the given paste store.
    pub fn new(store: Arc<dyn PasteStore>) -> Self {
        Self {
            store,
            registry: Arc::new(SessionRegistry::new()),
        }
    }

    /// The live-session registry.
    pub fn registry(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Take ownership of a freshly attached session and run it to
    /// completion in the background. Returns the assigned session id.
    pub fn attach(&self, handle: SessionHandle) -> SessionId {
        let id = SessionId::new();
        let info = SessionInfo {
            id,
            term: handle.term.clone(),
            width: handle.geometry.width,
            height: handle.geometry.height,
            connected_at: Instant::now(),
        };
        if let Err(e) = self.registry.insert(info) {
            warn!(session = %id, "failed to register session: {e}");
        }
        info!(session = %id, term = %handle.term, "session attached");

        let store = Arc::clone(&self.store);
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            match runner::run(id, handle, store).await {
                Ok(()) => info!(session = %id, "session closed"),
                Err(e) => warn!(session = %id, "session ended with error: {e}"),
            }
            if let Ok(Some(info)) = registry.remove(&id) {
                info!(
                    session = %id,
                    connected_secs = info.connected_for().as_secs(),
                    "session detached"
                );
            }
        });
        id
    }
}
