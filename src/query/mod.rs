//! Live read model over the plant collections.
//!
//! Each remote snapshot replaces the local copy wholesale. User plants are
//! filtered client-side by the current session id, and the subscription is
//! rebuilt whenever that id changes.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::auth::AuthState;
use crate::error::Result;
use crate::store::{RemoteStore, StoreEvent, Subscription};
use crate::types::{CatalogPlant, Entry, UserPlant, collections};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantsState {
    pub catalog: Vec<Entry<CatalogPlant>>,
    pub user_plants: Vec<Entry<UserPlant>>,
    /// True until the first catalog snapshot (or catalog error) arrives.
    pub loading: bool,
    /// True once the user plants settled for the current session: a snapshot
    /// or an error arrived for it, or there is no session to mirror.
    pub user_plants_ready: bool,
    #[serde(skip)]
    catalog_error: Option<String>,
    #[serde(skip)]
    user_plants_error: Option<String>,
}

impl Default for PlantsState {
    fn default() -> Self {
        Self {
            catalog: Vec::new(),
            user_plants: Vec::new(),
            loading: true,
            user_plants_ready: false,
            catalog_error: None,
            user_plants_error: None,
        }
    }
}

impl PlantsState {
    /// User-facing message when either subscription is failing. The data
    /// alongside it is the last snapshot that did arrive.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.catalog_error
            .as_deref()
            .or(self.user_plants_error.as_deref())
    }
}

/// Mirrors `catalogo_plantas` and the session's `plantas_usuario` records.
///
/// Must be started inside a tokio runtime. Dropping the query aborts its
/// tasks, which detaches every store listener it holds.
pub struct PlantsQuery {
    state: watch::Receiver<PlantsState>,
    tasks: Vec<JoinHandle<()>>,
}

impl PlantsQuery {
    pub fn start(
        store: Arc<dyn RemoteStore>,
        session: watch::Receiver<AuthState>,
    ) -> Result<Self> {
        let (tx, rx) = watch::channel(PlantsState::default());
        let tx = Arc::new(tx);

        let catalog = store.subscribe(collections::CATALOG_PLANTS)?;
        let tasks = vec![
            tokio::spawn(mirror_catalog(catalog, tx.clone())),
            tokio::spawn(mirror_user_plants(store, session, tx)),
        ];

        Ok(Self { state: rx, tasks })
    }

    #[must_use]
    pub fn state(&self) -> PlantsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlantsState> {
        self.state.clone()
    }

    /// Stops mirroring and waits until every listener is detached.
    pub async fn stop(mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            let _ = task.await;
        }
    }
}

impl Drop for PlantsQuery {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn mirror_catalog(mut subscription: Subscription, state: Arc<watch::Sender<PlantsState>>) {
    while let Some(event) = subscription.recv().await {
        match event {
            StoreEvent::Value(snapshot) => {
                let catalog =
                    decode_collection::<CatalogPlant>(collections::CATALOG_PLANTS, &snapshot, |_| true);
                state.send_modify(|s| {
                    s.catalog = catalog;
                    s.loading = false;
                    s.catalog_error = None;
                });
            }
            StoreEvent::Error(message) => {
                tracing::warn!(error = %message, "catalog subscription failed");
                state.send_modify(|s| {
                    s.loading = false;
                    s.catalog_error = Some(format!("Could not load the plant catalog: {message}"));
                });
            }
        }
    }
}

async fn mirror_user_plants(
    store: Arc<dyn RemoteStore>,
    mut session: watch::Receiver<AuthState>,
    state: Arc<watch::Sender<PlantsState>>,
) {
    let mut user_id = session.borrow_and_update().user_id().map(str::to_string);
    let mut subscription = resubscribe(store.as_ref(), user_id.as_deref(), &state);
    let mut session_open = true;

    loop {
        tokio::select! {
            changed = session.changed(), if session_open => {
                if changed.is_err() {
                    session_open = false;
                    continue;
                }
                let next = session.borrow_and_update().user_id().map(str::to_string);
                if next != user_id {
                    tracing::debug!(from = ?user_id, to = ?next, "session changed, resubscribing");
                    // Detach the old listener before attaching the new one.
                    drop(subscription.take());
                    user_id = next;
                    subscription = resubscribe(store.as_ref(), user_id.as_deref(), &state);
                }
            }
            event = next_event(&mut subscription) => {
                let Some(id) = user_id.as_deref() else { continue };
                match event {
                    Some(StoreEvent::Value(snapshot)) => {
                        let plants = decode_collection::<UserPlant>(
                            collections::USER_PLANTS,
                            &snapshot,
                            |record| record.get("usuarioId").and_then(Value::as_str) == Some(id),
                        );
                        state.send_modify(|s| {
                            s.user_plants = plants;
                            s.user_plants_ready = true;
                            s.user_plants_error = None;
                        });
                    }
                    Some(StoreEvent::Error(message)) => {
                        tracing::warn!(error = %message, "user plants subscription failed");
                        state.send_modify(|s| {
                            s.user_plants_ready = true;
                            s.user_plants_error = Some(format!("Could not load your plants: {message}"));
                        });
                    }
                    None => subscription = None,
                }
            }
        }
    }
}

/// Clears the mirrored user plants and attaches a listener for `user_id`.
fn resubscribe(
    store: &dyn RemoteStore,
    user_id: Option<&str>,
    state: &watch::Sender<PlantsState>,
) -> Option<Subscription> {
    state.send_modify(|s| {
        s.user_plants.clear();
        s.user_plants_error = None;
        s.user_plants_ready = user_id.is_none();
    });

    if user_id.is_none() {
        return None;
    }
    match store.subscribe(collections::USER_PLANTS) {
        Ok(subscription) => Some(subscription),
        Err(e) => {
            tracing::warn!(error = %e, "failed to subscribe to user plants");
            state.send_modify(|s| {
                s.user_plants_ready = true;
                s.user_plants_error = Some(format!("Could not load your plants: {e}"));
            });
            None
        }
    }
}

async fn next_event(subscription: &mut Option<Subscription>) -> Option<StoreEvent> {
    match subscription {
        Some(subscription) => subscription.recv().await,
        None => std::future::pending().await,
    }
}

/// Decodes the records of a collection snapshot in key order, skipping
/// records rejected by `keep` or that fail to decode.
pub fn decode_collection<T: DeserializeOwned>(
    collection: &str,
    snapshot: &Value,
    keep: impl Fn(&Value) -> bool,
) -> Vec<Entry<T>> {
    let Value::Object(records) = snapshot else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|(_, record)| keep(record))
        .filter_map(|(id, record)| match T::deserialize(record) {
            Ok(value) => Some(Entry::new(id.clone(), value)),
            Err(e) => {
                tracing::warn!(collection, id = %id, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect()
}
