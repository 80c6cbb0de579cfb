//! Persistence bridge: snapshot stores and the remote table sink.
//!
//! The engine never holds a global slot. Callers pass store handles into a
//! [`PersistenceBridge`], so independent pipelines (and tests) never share
//! state.

mod bridge;
mod remote;
mod snapshot;
mod store;

pub use bridge::PersistenceBridge;
pub use remote::{
    HttpSinkConfig, HttpTableSink, NoSink, TableSink, SINK_TOKEN_ENV, SINK_URL_ENV,
};
pub use snapshot::{Row, Snapshot};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
