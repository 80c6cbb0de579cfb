//! Snapshot stores: a single slot holding the latest snapshot.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::snapshot::Snapshot;
use crate::error::{Result, SieveError};

/// A durable slot for one whole snapshot. No partial updates.
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored snapshot.
    fn write(&self, snapshot: &Snapshot) -> impl Future<Output = Result<()>> + Send;

    /// Read the stored snapshot, if any has been written.
    fn read(&self) -> impl Future<Output = Result<Option<Snapshot>>> + Send;
}

/// JSON file on disk.
///
/// Writes go to a temporary sibling that is renamed over the target, so a
/// reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(|e| {
            SieveError::Persistence(format!("Failed to serialize snapshot: {}", e))
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    SieveError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await.map_err(|e| {
            SieveError::Persistence(format!("Failed to write '{}': {}", temp.display(), e))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            SieveError::Persistence(format!(
                "Failed to move snapshot into '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    async fn read(&self) -> Result<Option<Snapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SieveError::Persistence(format!(
                    "Failed to open '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let snapshot = serde_json::from_slice(&bytes).map_err(|e| {
            SieveError::Persistence(format!(
                "Failed to parse snapshot '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(snapshot))
    }
}

/// In-process slot. Each instance is independent.
///
/// Snapshots are held as JSON so they go through the same serialization a
/// durable store would apply.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        *self.slot.lock().await = Some(json);
        Ok(())
    }

    async fn read(&self) -> Result<Option<Snapshot>> {
        let slot = self.slot.lock().await;
        match slot.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }
}
