//! In-memory paste store.
//!
//! Drop-in substitute for [`FileStore`](super::FileStore) in tests. The
//! availability toggle simulates a store outage so error paths can be
//! exercised without touching a disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PasteStore;
use crate::error::{Error, Result};
use crate::id::PasteId;

/// Volatile paste store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a simulated outage. While unavailable, every operation
    /// fails with [`Error::StoreUnavailable`].
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Number of pastes currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no pastes.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(Error::StoreUnavailable("simulated outage".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PasteStore for MemoryStore {
    async fn get(&self, id: &PasteId) -> Result<String> {
        self.check_available()?;
        self.entries
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Error::PasteNotFound(id.to_string()))
    }

    async fn set(&self, id: &PasteId, content: &str) -> Result<()> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(id.to_string(), content.to_owned());
        Ok(())
    }

    // There is only one view of a map, so sync has nothing to pull.
    async fn sync(&self) -> Result<()> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        let id = PasteId::generate().unwrap();
        store.set(&id, "content").await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), "content");
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = MemoryStore::new();
        let id: PasteId = "zzzzzzzz".parse().unwrap();
        assert!(matches!(store.get(&id).await, Err(Error::PasteNotFound(_))));
    }

    #[tokio::test]
    async fn test_outage_fails_every_operation() {
        let store = MemoryStore::new();
        let id = PasteId::generate().unwrap();
        store.set(&id, "content").await.unwrap();

        store.set_available(false);
        assert!(matches!(store.get(&id).await, Err(Error::StoreUnavailable(_))));
        assert!(matches!(store.set(&id, "x").await, Err(Error::StoreUnavailable(_))));
        assert!(matches!(store.sync().await, Err(Error::StoreUnavailable(_))));

        store.set_available(true);
        assert_eq!(store.get(&id).await.unwrap(), "content");
    }

    #[tokio::test]
    async fn test_sync_is_a_noop() {
        let store = MemoryStore::new();
        let id = PasteId::generate().unwrap();
        store.set(&id, "content").await.unwrap();
        store.sync().await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), "content");
    }
}
