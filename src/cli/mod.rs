mod commands;
mod db;
mod plants;
mod session;
mod theme;

pub use commands::{DbCommands, SessionCommands, ThemeCommands};
pub use db::{run_db_clear, run_db_populate};
pub use plants::{run_plants, run_water};
pub use session::{run_session_login, run_session_logout, run_session_show, run_session_update};
pub use theme::{run_theme_show, run_theme_toggle};

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::storage::SqliteLocalStorage;
use crate::store::SqliteStore;
use crate::theme::ThemeContext;

/// Storage handles for one data directory.
pub struct App {
    pub config: AppConfig,
    pub local: Arc<SqliteLocalStorage>,
    pub remote: Arc<SqliteStore>,
}

impl App {
    /// Auth context with the persisted session already restored.
    pub fn auth(&self) -> AuthContext {
        let auth = AuthContext::new(self.local.clone(), self.config.session_key.clone());
        auth.restore();
        auth
    }

    pub fn theme(&self) -> ThemeContext {
        ThemeContext::with_storage(self.local.clone(), self.config.theme_key.clone())
    }
}

/// Opens (creating if needed) both databases in the data directory.
pub fn open_app(data_dir: &str) -> anyhow::Result<App> {
    let data_path: PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let config = AppConfig::load(&data_path)?;

    let local = SqliteLocalStorage::new(config.local_storage_path())?;
    local.initialize()?;

    let remote = SqliteStore::new(config.remote_store_path())?;
    remote.initialize()?;

    Ok(App {
        config,
        local: Arc::new(local),
        remote: Arc::new(remote),
    })
}
