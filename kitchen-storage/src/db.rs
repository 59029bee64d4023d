//! Database handle shared by the stores.
//!
//! A single SQLite connection behind a mutex, cloned cheaply into the
//! per-table stores. Opening a database bootstraps any missing tables;
//! the destructive resets are separate, explicit operations.

use std::path::Path;
use std::sync::{Arc, Mutex};

use kitchen_core::StorageError;
use rusqlite::Connection;

use crate::chef_store::ChefStore;
use crate::error::schema_err;
use crate::schema;
use crate::user_store::UserStore;

/// Shared handle to the SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file at `path` and create any
    /// missing tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref()).map_err(schema_err)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(schema_err)?;
        schema::bootstrap(&conn)?;
        tracing::info!(path = %path.as_ref().display(), "database opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(schema_err)?;
        schema::bootstrap(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with the locked connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let guard = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&guard)
    }

    /// Round-trip the connection; used by the readiness probe.
    pub fn health_check(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))
                .map_err(crate::error::query_err)
        })
    }

    /// Store handle for the chefs table.
    pub fn chefs(&self) -> ChefStore {
        ChefStore::new(self.clone())
    }

    /// Store handle for the users table.
    pub fn users(&self) -> UserStore {
        UserStore::new(self.clone())
    }

    /// Drop and recreate the chefs table. Destructive.
    pub fn reset_chefs(&self) -> Result<(), StorageError> {
        self.with_conn(schema::reset_chefs)
    }

    /// Drop and recreate the users table. Destructive.
    pub fn reset_users(&self) -> Result<(), StorageError> {
        self.with_conn(schema::reset_users)
    }
}
