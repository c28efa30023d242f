//! Device-local key-value storage.
//!
//! This is where the app keeps state that belongs to one device only: the
//! logged-in session and the theme preference.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryLocalStorage;
pub use sqlite::SqliteLocalStorage;

use crate::error::Result;

/// LocalStorage defines the device storage interface: string values under
/// string keys.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removes the item. Returns whether it existed.
    fn remove_item(&self, key: &str) -> Result<bool>;
}
