//! Session management.
//!
//! One attached client is one session: an isolated task running its own
//! state machine against the shared paste store. This module provides
//! session identification, the live-session registry, the manager that
//! spawns and isolates sessions, and the per-session event loop.

mod id;
mod manager;
mod registry;
mod runner;

pub use id::SessionId;
pub use manager::SessionManager;
pub use registry::{SessionInfo, SessionRegistry};

use tokio::sync::mpsc;

use crate::ui::InputEvent;

/// Terminal dimensions reported by the session provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

/// One attached client, as handed over by the session provider.
///
/// `input` carries key, resize and disconnect events in arrival order;
/// rendered frames and clipboard writes go out through `output`.
#[derive(Debug)]
pub struct SessionHandle {
    pub geometry: Geometry,
    pub term: String,
    pub input: mpsc::Receiver<InputEvent>,
    pub output: mpsc::Sender<Vec<u8>>,
}
