//! Store for the users table.
//!
//! Passwords are stored as hex SHA-256 digests of password + salt, where
//! the salt is 16 random bytes hex-encoded per user.

use kitchen_core::StorageError;
use rand::RngCore;
use rusqlite::params;
use sha2::{Digest, Sha256};

use crate::db::Database;
use crate::error::{is_constraint_violation, query_err};

fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Account operations over the users table.
#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create an account. Duplicate usernames are rejected by the unique
    /// column constraint.
    pub fn create(&self, username: &str, password: &str) -> Result<(), StorageError> {
        let salt = generate_salt();
        let hashed = hash_password(password, &salt);

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, salt, password) VALUES (?1, ?2, ?3)",
                params![username, salt, hashed],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    StorageError::DuplicateUser {
                        username: username.to_string(),
                    }
                } else {
                    query_err(e)
                }
            })
        })?;

        tracing::info!(username = %username, "user created");
        Ok(())
    }

    /// Check a candidate password: hash it with the stored salt and
    /// compare against the stored digest.
    pub fn check_password(&self, username: &str, password: &str) -> Result<bool, StorageError> {
        let (salt, stored): (String, String) = self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT salt, password FROM users WHERE username = ?1",
                [username],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::UserNotFound {
                    username: username.to_string(),
                },
                other => query_err(other),
            })
        })?;

        Ok(hash_password(password, &salt) == stored)
    }

    /// Re-salt and re-hash the password for an existing account.
    pub fn update_password(&self, username: &str, new_password: &str) -> Result<(), StorageError> {
        let salt = generate_salt();
        let hashed = hash_password(new_password, &salt);

        let affected = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE users SET salt = ?1, password = ?2 WHERE username = ?3",
                params![salt, hashed, username],
            )
            .map_err(query_err)
        })?;

        if affected == 0 {
            return Err(StorageError::UserNotFound {
                username: username.to_string(),
            });
        }
        tracing::info!(username = %username, "password updated");
        Ok(())
    }

    /// Delete an account.
    pub fn delete(&self, username: &str) -> Result<(), StorageError> {
        let affected = self.db.with_conn(|conn| {
            conn.execute("DELETE FROM users WHERE username = ?1", [username])
                .map_err(query_err)
        })?;
        if affected == 0 {
            return Err(StorageError::UserNotFound {
                username: username.to_string(),
            });
        }
        tracing::info!(username = %username, "user deleted");
        Ok(())
    }

    /// Look up an account's id.
    pub fn id_by_username(&self, username: &str) -> Result<i64, StorageError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id FROM users WHERE username = ?1",
                [username],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StorageError::UserNotFound {
                    username: username.to_string(),
                },
                other => query_err(other),
            })
        })
    }
}
