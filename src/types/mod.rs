mod models;
mod session;

pub use models::*;
pub use session::{Session, SessionPatch};

/// Top-level collections of the remote store.
pub mod collections {
    pub const USERS: &str = "usuarios";
    pub const CATALOG_PLANTS: &str = "catalogo_plantas";
    pub const GREENHOUSES: &str = "estufas";
    pub const USER_PLANTS: &str = "plantas_usuario";

    /// All collections, in the order the seeder writes them.
    pub const ALL: [&str; 4] = [USERS, CATALOG_PLANTS, GREENHOUSES, USER_PLANTS];
}
