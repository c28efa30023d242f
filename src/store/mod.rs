//! Remote key-value tree shared by every client of the app.
//!
//! The tree follows Realtime Database semantics: records live under
//! slash-separated paths, writing `null` deletes a subtree, and empty objects
//! are never stored.

mod listeners;
mod memory;
pub mod path;
mod push_id;
mod schema;
mod sqlite;
pub(crate) mod tree;

pub use listeners::{StoreEvent, Subscription};
pub use memory::MemoryStore;
pub use push_id::PushIdGenerator;
pub use sqlite::SqliteStore;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Store defines the remote database interface.
pub trait RemoteStore: Send + Sync {
    /// Writes `value` under a freshly generated, chronologically ordered key
    /// below `path` and returns that key.
    fn push(&self, path: &str, value: Value) -> Result<String>;

    /// Replaces the subtree at `path`. `Value::Null` removes it.
    fn set(&self, path: &str, value: Value) -> Result<()>;

    /// Returns the subtree at `path`, or `Value::Null` when absent.
    fn get(&self, path: &str) -> Result<Value>;

    /// Attaches a listener to `path`. The current snapshot is delivered
    /// immediately and again after every write that touches the path.
    fn subscribe(&self, path: &str) -> Result<Subscription>;
}

/// Serializes `record` and pushes it below `path`.
pub fn push_record<T: Serialize>(store: &dyn RemoteStore, path: &str, record: &T) -> Result<String> {
    store.push(path, serde_json::to_value(record)?)
}

/// Returns the number of direct children stored at `path`.
pub fn count_children(store: &dyn RemoteStore, path: &str) -> Result<usize> {
    Ok(match store.get(path)? {
        Value::Object(map) => map.len(),
        _ => 0,
    })
}
