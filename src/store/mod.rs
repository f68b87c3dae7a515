//! Paste persistence.
//!
//! The store is a capability: sessions only see the [`PasteStore`]
//! contract. [`FileStore`] is the durable implementation; [`MemoryStore`]
//! substitutes for it in tests. Both are safe for concurrent use by any
//! number of sessions.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::id::PasteId;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Upper bound on a single store operation made on behalf of a session.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared, persistent mapping from paste identifier to content.
#[async_trait]
pub trait PasteStore: Send + Sync {
    /// Fetch the content stored under `id`.
    ///
    /// Fails with [`Error::PasteNotFound`] on a miss and
    /// [`Error::StoreUnavailable`] on I/O or corruption.
    async fn get(&self, id: &PasteId) -> Result<String>;

    /// Store `content` under `id`, silently overwriting an existing entry.
    async fn set(&self, id: &PasteId, content: &str) -> Result<()>;

    /// Pull externally committed writes into the local view.
    ///
    /// Must run before a retrieval that needs to observe pastes written
    /// by other sessions or processes.
    async fn sync(&self) -> Result<()>;
}

/// Run a store operation with the session-facing timeout applied.
///
/// Expiry is indistinguishable from the store being down, so it maps to
/// [`Error::StoreUnavailable`].
pub async fn guarded<T>(op: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(STORE_TIMEOUT, op).await {
        Ok(result) => result,
        Err(_) => Err(Error::StoreUnavailable("operation timed out".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_passes_result_through() {
        let ok = tokio_test::block_on(guarded(async { Ok(42) }));
        assert_eq!(ok.unwrap(), 42);

        let err: Result<()> =
            tokio_test::block_on(guarded(async { Err(Error::PasteNotFound("x".into())) }));
        assert!(matches!(err, Err(Error::PasteNotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guarded_times_out() {
        let result: Result<()> = guarded(async {
            tokio::time::sleep(STORE_TIMEOUT * 2).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
    }
}
