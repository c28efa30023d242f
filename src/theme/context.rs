use std::sync::Arc;

use tokio::sync::watch;

use super::{ColorTokens, ThemeMode};
use crate::storage::LocalStorage;

struct Persistence {
    storage: Arc<dyn LocalStorage>,
    key: String,
}

/// Active color scheme shared by every screen.
///
/// Mode changes are broadcast over a `watch` channel. When built with a
/// storage backend the preference is read once at construction and written
/// after each change; storage failures never surface to callers.
pub struct ThemeContext {
    mode: watch::Sender<ThemeMode>,
    persistence: Option<Persistence>,
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeContext {
    /// A context without persistence, starting in light mode.
    #[must_use]
    pub fn new() -> Self {
        let (mode, _) = watch::channel(ThemeMode::Light);
        Self {
            mode,
            persistence: None,
        }
    }

    /// A context that restores and saves its mode under `key`.
    pub fn with_storage(storage: Arc<dyn LocalStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = read_preference(storage.as_ref(), &key);
        let (mode, _) = watch::channel(initial);
        Self {
            mode,
            persistence: Some(Persistence { storage, key }),
        }
    }

    #[must_use]
    pub fn colors(&self) -> &'static ColorTokens {
        self.mode().colors()
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        *self.mode.borrow()
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.mode() == ThemeMode::Dark
    }

    /// True once the initial preference has been determined. The stored
    /// preference is read during construction, so a context is always loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        true
    }

    /// Flips between light and dark and returns the new mode.
    pub fn toggle_theme(&self) -> ThemeMode {
        let mut next = ThemeMode::Light;
        self.mode.send_modify(|mode| {
            *mode = mode.toggled();
            next = *mode;
        });
        self.persist(next);
        next
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        let changed = self.mode.send_if_modified(|current| {
            let changed = *current != mode;
            *current = mode;
            changed
        });
        if changed {
            self.persist(mode);
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.mode.subscribe()
    }

    fn persist(&self, mode: ThemeMode) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        if let Err(e) = persistence.storage.set_item(&persistence.key, mode.as_str()) {
            tracing::warn!(key = %persistence.key, error = %e, "failed to save theme preference");
        }
    }
}

fn read_preference(storage: &dyn LocalStorage, key: &str) -> ThemeMode {
    match storage.get_item(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "ignoring stored theme preference");
            ThemeMode::Light
        }),
        Ok(None) => ThemeMode::Light,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read theme preference");
            ThemeMode::Light
        }
    }
}
