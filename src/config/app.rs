use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "estufa.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Local storage key holding the serialized session.
    pub session_key: String,
    /// Local storage key holding the theme preference.
    pub theme_key: String,
}

impl AppConfig {
    /// Loads `estufa.toml` from the data directory, falling back to defaults
    /// when the file does not exist. `data_dir` always points at the directory
    /// the file was loaded from.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let path = data_dir.join(CONFIG_FILE_NAME);

        let mut config = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<Self>(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(Error::Io(e)),
        };
        config.data_dir = data_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.session_key.trim().is_empty() {
            return Err(Error::Config("session_key cannot be empty".to_string()));
        }
        if self.theme_key.trim().is_empty() {
            return Err(Error::Config("theme_key cannot be empty".to_string()));
        }
        if self.session_key == self.theme_key {
            return Err(Error::Config(
                "session_key and theme_key must differ".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn local_storage_path(&self) -> PathBuf {
        self.data_dir.join("local.db")
    }

    #[must_use]
    pub fn remote_store_path(&self) -> PathBuf {
        self.data_dir.join("remote.db")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            session_key: "usuario".to_string(),
            theme_key: "tema".to_string(),
        }
    }
}
