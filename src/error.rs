//! Error types for termpaste.

use thiserror::Error;

/// Main error type for termpaste operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No paste is stored under the given identifier.
    #[error("paste not found: {0}")]
    PasteNotFound(String),

    /// The store could not serve the request (I/O failure, corrupt data,
    /// or a timed-out operation).
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The OS randomness source failed while generating an identifier.
    #[error("identifier generation failed: {0}")]
    IdGeneration(String),

    /// A candidate identifier is not 8 characters of `a-z0-9`.
    #[error("invalid paste id: {0:?}")]
    InvalidPasteId(String),

    /// The session's peer went away.
    #[error("session closed")]
    SessionClosed,

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap any store-side failure into `StoreUnavailable`.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

/// Convenience Result type for termpaste operations.
pub type Result<T> = std::result::Result<T, Error>;
