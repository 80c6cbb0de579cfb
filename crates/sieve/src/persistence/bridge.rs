//! Boundary between the in-memory engine and external stores.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use super::remote::{NoSink, TableSink};
use super::snapshot::Snapshot;
use super::store::SnapshotStore;
use crate::error::{Result, SieveError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Explicit store handles for one pipeline.
///
/// Every call is awaitable and cancellable: dropping the future abandons
/// it, and calls running past the configured timeout fail with
/// [`SieveError::Timeout`]. Snapshots are taken by reference and never
/// modified, so a failure leaves the caller's state as it was.
pub struct PersistenceBridge<S, T = NoSink> {
    store: S,
    sink: T,
    timeout: Duration,
}

impl<S: SnapshotStore> PersistenceBridge<S, NoSink> {
    /// A bridge that only reads and writes snapshots.
    pub fn new(store: S) -> Self {
        Self {
            store,
            sink: NoSink,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl<S: SnapshotStore, T: TableSink> PersistenceBridge<S, T> {
    /// Attach a remote table store.
    pub fn with_sink<U: TableSink>(self, sink: U) -> PersistenceBridge<S, U> {
        PersistenceBridge {
            store: self.store,
            sink,
            timeout: self.timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the whole snapshot to the store.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let result = self.deadline(self.store.write(snapshot)).await;
        match &result {
            Ok(()) => info!(rows = snapshot.row_count, "snapshot saved"),
            Err(e) => warn!(error = %e, "snapshot save failed"),
        }
        result
    }

    /// Read the whole snapshot back.
    pub async fn load(&self) -> Result<Option<Snapshot>> {
        self.deadline(self.store.read()).await
    }

    /// Bulk-insert the snapshot's rows into `table`.
    ///
    /// One attempt, no retries. Returns the number of rows sent.
    pub async fn publish(&self, table: &str, snapshot: &Snapshot) -> Result<usize> {
        let result = self
            .deadline(self.sink.bulk_insert(table, &snapshot.rows))
            .await;
        match result {
            Ok(()) => {
                info!(table, rows = snapshot.rows.len(), "rows published");
                Ok(snapshot.rows.len())
            }
            Err(e) => {
                warn!(table, error = %e, "bulk insert failed");
                Err(e)
            }
        }
    }

    async fn deadline<R>(&self, call: impl Future<Output = Result<R>>) -> Result<R> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| SieveError::Timeout(self.timeout))?
    }
}
