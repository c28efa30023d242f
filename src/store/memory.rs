use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::listeners::Listeners;
use super::path::{join_path, parse_path};
use super::tree::{get_in, normalize, set_in};
use super::{PushIdGenerator, RemoteStore, Subscription};
use crate::error::Result;

/// In-process store. Data lives as long as the value does.
#[derive(Default)]
pub struct MemoryStore {
    root: Mutex<Value>,
    ids: PushIdGenerator,
    listeners: Listeners,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn root(&self) -> MutexGuard<'_, Value> {
        self.root.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl RemoteStore for MemoryStore {
    fn push(&self, path: &str, value: Value) -> Result<String> {
        let mut segments = parse_path(path)?;
        let id = self.ids.generate();
        segments.push(id.clone());
        self.set(&join_path(&segments), value)?;
        Ok(id)
    }

    fn set(&self, path: &str, value: Value) -> Result<()> {
        let segments = parse_path(path)?;
        let value = normalize(value);

        let mut root = self.root();
        set_in(&mut root, &segments, value);
        tracing::debug!(path = %join_path(&segments), "memory store write");
        self.listeners
            .notify(&segments, |p| Ok(get_in(&root, p)));
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Value> {
        let segments = parse_path(path)?;
        Ok(get_in(&self.root(), &segments))
    }

    fn subscribe(&self, path: &str) -> Result<Subscription> {
        let segments = parse_path(path)?;
        let root = self.root();
        let initial = get_in(&root, &segments);
        Ok(self.listeners.register(segments, Ok(initial)))
    }
}
