//! # termpaste
//!
//! A pastebin you reach from a terminal. Clients attach over a
//! multiplexed terminal transport, walk a small menu, and either store a
//! text blob under a fresh 8-character identifier or fetch one by id.
//!
//! Every attached client gets its own state machine running on its own
//! task; all of them share one persistent key-value paste store. A
//! session's events (key presses, resizes, the progress tick, store-call
//! completions) flow through a single ordered queue, and a session's
//! failure can never take down a sibling session or the process.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use termpaste::{transport, AppState, MemoryStore, ServerConfig, SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> termpaste::Result<()> {
//!     termpaste::logging::try_init("info").ok();
//!
//!     let store = Arc::new(MemoryStore::new());
//!     let manager = Arc::new(SessionManager::new(store));
//!
//!     transport::serve(ServerConfig::default(), AppState { manager }).await
//! }
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod session;
pub mod store;
pub mod transport;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use id::PasteId;
pub use session::{Geometry, SessionHandle, SessionId, SessionManager};
pub use store::{FileStore, MemoryStore, PasteStore};
pub use transport::{AppState, ClientMessage, ServerConfig};
pub use ui::{
    Action, InputEvent, KeyInput, Model, Phase, SessionEvent, WorkOutcome, WorkRequest,
};
