//! Schema DDL for the chefs and users tables.
//!
//! The canonical chefs DDL is a drop-and-recreate script: applying it to a
//! database that already holds chef rows discards them. [`reset_chefs`]
//! exposes exactly that semantics; [`bootstrap`] creates missing tables
//! without touching existing data, which is what the server does on
//! startup.

use kitchen_core::StorageError;
use rusqlite::Connection;

use crate::error::schema_err;

// ============================================================================
// CHEFS
// ============================================================================

pub const DROP_CHEFS_TABLE: &str = "DROP TABLE IF EXISTS chefs";

/// The chefs table as applied. Every evaluable constraint is kept: NOT
/// NULL on all required columns, defaults of zero for the counters, and
/// the `wins` bounds check against `cookoffs`.
pub const CREATE_CHEFS_TABLE: &str = "\
CREATE TABLE chefs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    specialty TEXT NOT NULL,
    years_experience INTEGER NOT NULL,
    signature_dishes TEXT NOT NULL,
    age INTEGER NOT NULL,
    wins INTEGER DEFAULT 0 CHECK (wins >= 0 AND wins <= cookoffs),
    cookoffs INTEGER DEFAULT 0
)";

pub const CREATE_CHEFS_NAME_INDEX: &str =
    "CREATE UNIQUE INDEX idx_chefs_name ON chefs(name)";

/// Legacy form of the chefs DDL. Its CHECK clauses on `years_experience`
/// and `age` name columns (`year`, `duration`) the table does not define.
/// SQLite rejects this statement at creation time with "no such column";
/// the constant stays here, uncorrected, so that behavior is pinned by
/// test instead of being rewritten into guessed intent. The bounds the
/// clauses were presumably after are enforced in application code
/// (`NewChef::validate`).
pub const CREATE_CHEFS_TABLE_LEGACY: &str = "\
CREATE TABLE chefs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    specialty TEXT NOT NULL,
    years_experience INTEGER NOT NULL CHECK (year >= 0),
    signature_dishes TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (duration > 0),
    wins INTEGER DEFAULT 0 CHECK (wins >= 0 AND wins <= cookoffs),
    cookoffs INTEGER DEFAULT 0
)";

// ============================================================================
// USERS
// ============================================================================

pub const DROP_USERS_TABLE: &str = "DROP TABLE IF EXISTS users";

pub const CREATE_USERS_TABLE: &str = "\
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    salt TEXT NOT NULL,
    password TEXT NOT NULL
)";

// ============================================================================
// OPERATIONS
// ============================================================================

fn table_exists(conn: &Connection, name: &str) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |_| Ok(()),
    )
    .map(|_| true)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(false),
        other => Err(schema_err(other)),
    })
}

/// Create any missing tables without touching existing data.
pub fn bootstrap(conn: &Connection) -> Result<(), StorageError> {
    if !table_exists(conn, "chefs")? {
        conn.execute(CREATE_CHEFS_TABLE, []).map_err(schema_err)?;
        conn.execute(CREATE_CHEFS_NAME_INDEX, [])
            .map_err(schema_err)?;
        tracing::info!("chefs table created");
    }
    if !table_exists(conn, "users")? {
        conn.execute(CREATE_USERS_TABLE, []).map_err(schema_err)?;
        tracing::info!("users table created");
    }
    Ok(())
}

/// Drop and recreate the chefs table and its name index.
///
/// Destructive: any existing chef rows are discarded.
pub fn reset_chefs(conn: &Connection) -> Result<(), StorageError> {
    let script = format!(
        "{};\n{};\n{};",
        DROP_CHEFS_TABLE, CREATE_CHEFS_TABLE, CREATE_CHEFS_NAME_INDEX
    );
    conn.execute_batch(&script).map_err(schema_err)?;
    tracing::warn!("chefs table dropped and recreated");
    Ok(())
}

/// Drop and recreate the users table. Destructive.
pub fn reset_users(conn: &Connection) -> Result<(), StorageError> {
    let script = format!("{};\n{};", DROP_USERS_TABLE, CREATE_USERS_TABLE);
    conn.execute_batch(&script).map_err(schema_err)?;
    tracing::warn!("users table dropped and recreated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_bootstrap_creates_tables() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        assert!(table_exists(&conn, "chefs").unwrap());
        assert!(table_exists(&conn, "users").unwrap());
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        conn.execute(
            "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age)
             VALUES ('A', 'Italian', 5, 'Risotto', 30)",
            [],
        )
        .unwrap();

        bootstrap(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM chefs", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_reset_chefs_discards_rows() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        conn.execute(
            "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age)
             VALUES ('A', 'Italian', 5, 'Risotto', 30)",
            [],
        )
        .unwrap();

        reset_chefs(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM chefs", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_duplicate_name_rejected_by_index() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        let insert = "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age)
                      VALUES ('A', 'Italian', 5, 'Risotto', 30)";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }

    #[test]
    fn test_wins_above_cookoffs_rejected() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age, wins, cookoffs)
             VALUES ('A', 'Italian', 5, 'Risotto', 30, 3, 2)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_wins_rejected() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age, wins, cookoffs)
             VALUES ('A', 'Italian', 5, 'Risotto', 30, -1, 2)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_null_required_column_rejected() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age)
             VALUES ('A', NULL, 5, 'Risotto', 30)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_counter_defaults_are_zero() {
        let conn = conn();
        bootstrap(&conn).unwrap();
        conn.execute(
            "INSERT INTO chefs (name, specialty, years_experience, signature_dishes, age)
             VALUES ('A', 'Italian', 5, 'Risotto', 30)",
            [],
        )
        .unwrap();
        let (wins, cookoffs): (i64, i64) = conn
            .query_row("SELECT wins, cookoffs FROM chefs WHERE name = 'A'", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!((wins, cookoffs), (0, 0));
    }

    /// The legacy DDL's CHECK clauses reference columns that do not exist.
    /// SQLite refuses to create the table at all.
    #[test]
    fn test_legacy_checks_rejected_at_create_time() {
        let conn = conn();
        let err = conn
            .execute(CREATE_CHEFS_TABLE_LEGACY, [])
            .expect_err("table with unresolvable CHECK columns must not be created");
        assert!(err.to_string().contains("no such column"));
        assert!(!table_exists(&conn, "chefs").unwrap());
    }
}
