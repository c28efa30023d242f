use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::error::Error;
use crate::storage::LocalStorage;
use crate::types::{Session, SessionPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The persisted session has not been read yet. Protected content must
    /// not be shown in this state.
    Loading,
    Anonymous,
    Authenticated(Session),
}

impl AuthState {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session().map(|s| s.id.as_str())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Who is logged in, mirrored to local storage.
///
/// Storage failures are logged and swallowed: the in-memory state stays
/// authoritative until the next restart.
pub struct AuthContext {
    storage: Arc<dyn LocalStorage>,
    key: String,
    state: watch::Sender<AuthState>,
    /// Held across each memory update and its storage write so the two
    /// never interleave with another transition.
    writes: Mutex<()>,
}

impl AuthContext {
    /// Creates the context in the `Loading` state; call [`AuthContext::restore`]
    /// to read the persisted session.
    pub fn new(storage: Arc<dyn LocalStorage>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self {
            storage,
            key: key.into(),
            state,
            writes: Mutex::new(()),
        }
    }

    /// Reads the persisted session and leaves the `Loading` state. Does
    /// nothing if a login already happened in the meantime.
    pub fn restore(&self) -> AuthState {
        let _guard = self.lock_writes();
        let restored = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => AuthState::Authenticated(session),
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "discarding unreadable session");
                    AuthState::Anonymous
                }
            },
            Ok(None) => AuthState::Anonymous,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read session");
                AuthState::Anonymous
            }
        };

        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = restored;
                true
            } else {
                false
            }
        });
        self.state()
    }

    /// Replaces the current session. Credentials are not checked here.
    pub fn login(&self, session: Session) {
        tracing::debug!(user_id = %session.id, "login");
        let _guard = self.lock_writes();
        self.persist(&session);
        self.state.send_replace(AuthState::Authenticated(session));
    }

    /// Clears the session from memory and storage. Safe to call repeatedly.
    pub fn logout(&self) {
        let _guard = self.lock_writes();
        if let Err(e) = self.storage.remove_item(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to remove persisted session");
        }
        self.state.send_if_modified(|state| {
            if matches!(state, AuthState::Anonymous) {
                false
            } else {
                *state = AuthState::Anonymous;
                true
            }
        });
    }

    /// Applies `patch` to the active session. Returns false, changing nothing,
    /// when nobody is logged in.
    pub fn update_session(&self, patch: &SessionPatch) -> bool {
        let _guard = self.lock_writes();
        let mut merged = None;
        self.state.send_if_modified(|state| match state {
            AuthState::Authenticated(current) => {
                let next = current.merged(patch);
                *current = next.clone();
                merged = Some(next);
                true
            }
            _ => false,
        });

        match merged {
            Some(session) => {
                self.persist(&session);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().session().is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, session: &Session) {
        let result = serde_json::to_string(session)
            .map_err(Error::from)
            .and_then(|raw| self.storage.set_item(&self.key, &raw));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to persist session");
        }
    }
}
