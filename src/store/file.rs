//! File-backed paste store.
//!
//! Pastes are persisted as a JSON-lines append log. `set` appends one
//! record and updates an in-memory index; `sync` replays the log from
//! disk so writes committed by other processes become visible. A torn
//! trailing line (an append interrupted mid-write) is skipped during
//! replay; corruption anywhere else in the log is an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::warn;

use super::PasteStore;
use crate::error::{Error, Result};
use crate::id::PasteId;

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    id: String,
    content: String,
}

/// Durable paste store over a JSON-lines log file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, replaying any existing log.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(Error::store)?;
            }
        }
        let entries = replay(&path).await?;
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Number of pastes currently visible in the local view.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the local view holds no pastes.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

async fn replay(path: &Path) -> Result<HashMap<String, String>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(Error::store(e)),
    };

    let mut entries = HashMap::new();
    let lines: Vec<&str> = raw.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(line) {
            Ok(record) => {
                entries.insert(record.id, record.content);
            }
            // An interrupted append leaves a torn final line; that record
            // never committed and is dropped.
            Err(e) if i + 1 == lines.len() => {
                warn!("dropping torn record at end of {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(Error::store(format!("corrupt record at line {}: {}", i + 1, e)));
            }
        }
    }
    Ok(entries)
}

#[async_trait]
impl PasteStore for FileStore {
    async fn get(&self, id: &PasteId) -> Result<String> {
        self.entries
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Error::PasteNotFound(id.to_string()))
    }

    async fn set(&self, id: &PasteId, content: &str) -> Result<()> {
        let record = Record {
            id: id.to_string(),
            content: content.to_owned(),
        };
        let mut line = serde_json::to_string(&record).map_err(Error::store)?;
        line.push('\n');

        // The write lock also serializes appends, so records from
        // concurrent sessions never interleave within the file.
        let mut entries = self.entries.write().await;
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(Error::store)?;
        log.write_all(line.as_bytes()).await.map_err(Error::store)?;
        log.sync_data().await.map_err(Error::store)?;
        entries.insert(record.id, record.content);
        Ok(())
    }

    async fn sync(&self) -> Result<()> {
        let fresh = replay(&self.path).await?;
        *self.entries.write().await = fresh;
        Ok(())
    }
}
