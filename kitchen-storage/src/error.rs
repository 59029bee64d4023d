//! Mapping from rusqlite errors into the storage error taxonomy.
//!
//! `StorageError` lives in kitchen-core and rusqlite is a foreign crate,
//! so the conversions are plain functions rather than `From` impls.

use kitchen_core::StorageError;
use rusqlite::ErrorCode;

/// Map a rusqlite error from a query or statement into a [`StorageError`].
///
/// Constraint violations (unique index, CHECK, NOT NULL) are kept apart
/// from other failures so callers can translate them into conflicts.
pub fn query_err(err: rusqlite::Error) -> StorageError {
    tracing::error!(error = %err, "database operation failed");
    match &err {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation =>
        {
            StorageError::ConstraintViolation {
                reason: err.to_string(),
            }
        }
        _ => StorageError::QueryFailed {
            reason: err.to_string(),
        },
    }
}

/// Map a rusqlite error from a DDL statement into a [`StorageError`].
pub fn schema_err(err: rusqlite::Error) -> StorageError {
    tracing::error!(error = %err, "schema operation failed");
    StorageError::SchemaFailed {
        reason: err.to_string(),
    }
}

/// True when the error is a constraint violation (used to translate
/// unique-index failures into duplicate-entity errors).
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_maps_to_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (v TEXT UNIQUE)", []).unwrap();
        conn.execute("INSERT INTO t (v) VALUES ('x')", []).unwrap();

        let err = conn
            .execute("INSERT INTO t (v) VALUES ('x')", [])
            .unwrap_err();
        assert!(is_constraint_violation(&err));
        assert!(matches!(
            query_err(err),
            StorageError::ConstraintViolation { .. }
        ));
    }

    #[test]
    fn test_missing_table_maps_to_query_failed() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("INSERT INTO nope (v) VALUES (1)", []).unwrap_err();
        assert!(!is_constraint_violation(&err));
        assert!(matches!(query_err(err), StorageError::QueryFailed { .. }));
    }
}
