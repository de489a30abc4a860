//! Shared router state.
//!
//! # Invariants
//! - The process holds exactly one SQLite connection; handlers take the lock
//!   on a blocking thread and release it before responding.

use bookshelf_core::db::{open_db, open_db_fresh, open_db_in_memory};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::config::{DatabaseLocation, ServerConfig};
use crate::error::ServerResult;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens the configured database, recreating the schema when requested.
    pub fn open(config: &ServerConfig) -> ServerResult<Self> {
        let conn = match (&config.database, config.reset_schema) {
            (DatabaseLocation::InMemory, _) => open_db_in_memory()?,
            (DatabaseLocation::File(path), true) => open_db_fresh(path)?,
            (DatabaseLocation::File(path), false) => open_db(path)?,
        };
        Ok(Self::new(conn))
    }
}
