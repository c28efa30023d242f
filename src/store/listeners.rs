use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;
use tokio::sync::mpsc;

use super::tree::overlaps;
use crate::error::Result;

/// A notification delivered to a subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Full snapshot of the subscribed path.
    Value(Value),
    /// The transport failed to produce a snapshot. The listener stays
    /// attached; later writes may still deliver values.
    Error(String),
}

type Detach = Box<dyn FnOnce() + Send>;

/// A live listener on a store path. Dropping it detaches the listener.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<StoreEvent>,
    detach: Option<Detach>,
}

impl Subscription {
    /// Wraps a receiving channel; `detach` runs exactly once, when the
    /// subscription is dropped.
    pub fn new<F>(rx: mpsc::UnboundedReceiver<StoreEvent>, detach: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            rx,
            detach: Some(Box::new(detach)),
        }
    }

    /// Waits for the next event. Returns `None` once the store has gone away.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        self.rx.recv().await
    }

    /// Returns a pending event without waiting.
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

struct Listener {
    path: Vec<String>,
    tx: mpsc::UnboundedSender<StoreEvent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: HashMap<u64, Listener>,
}

/// Listener bookkeeping shared by the store implementations.
///
/// Stores call `register` and `notify` while holding their own data lock, so
/// events reach each channel in the same order as the writes they describe.
#[derive(Default)]
pub(crate) struct Listeners {
    registry: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|e| e.into_inner())
}

impl Listeners {
    pub fn register(&self, path: Vec<String>, initial: Result<Value>) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(to_event(initial));

        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            tracing::debug!(id, path = %path.join("/"), "listener attached");
            registry.entries.insert(id, Listener { path, tx });
            id
        };

        let weak: Weak<Mutex<Registry>> = Arc::downgrade(&self.registry);
        Subscription::new(rx, move || {
            if let Some(registry) = weak.upgrade() {
                if lock(&registry).entries.remove(&id).is_some() {
                    tracing::debug!(id, "listener detached");
                }
            }
        })
    }

    /// Sends a fresh snapshot to every listener whose path overlaps `written`.
    pub fn notify<F>(&self, written: &[String], snapshot: F)
    where
        F: Fn(&[String]) -> Result<Value>,
    {
        let registry = lock(&self.registry);
        for listener in registry.entries.values() {
            if overlaps(listener.path.as_slice(), written) {
                let _ = listener.tx.send(to_event(snapshot(&listener.path)));
            }
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }
}

fn to_event(snapshot: Result<Value>) -> StoreEvent {
    match snapshot {
        Ok(value) => StoreEvent::Value(value),
        Err(e) => StoreEvent::Error(e.to_string()),
    }
}
