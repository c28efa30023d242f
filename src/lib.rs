//! # Estufa
//!
//! State layer of a household plant and greenhouse manager, usable both as a
//! library and through the `estufa` developer CLI.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use estufa::auth::AuthContext;
//! use estufa::query::PlantsQuery;
//! use estufa::seed::DatabaseSeeder;
//! use estufa::storage::MemoryLocalStorage;
//! use estufa::store::MemoryStore;
//! use estufa::theme::ThemeContext;
//!
//! let remote = Arc::new(MemoryStore::new());
//! DatabaseSeeder::new(remote.as_ref()).populate()?;
//!
//! let local = Arc::new(MemoryLocalStorage::new());
//! let theme = ThemeContext::with_storage(local.clone(), "tema");
//! let auth = AuthContext::new(local, "usuario");
//! auth.restore();
//!
//! // Inside a tokio runtime:
//! let plants = PlantsQuery::start(remote, auth.subscribe())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI module. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod seed;
pub mod storage;
pub mod store;
pub mod theme;
pub mod types;
