//! Session-token authentication.
//!
//! Login exchanges a username/password for an opaque bearer token held in
//! an in-process session map. Logout revokes the token. There is no
//! expiry; a token lives until revoked or the process restarts.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// TYPES
// ============================================================================

/// Authenticated caller context injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    /// The token the request authenticated with (needed for logout).
    pub token: String,
}

/// One live session.
#[derive(Debug, Clone)]
struct Session {
    user_id: i64,
    username: String,
    created_at: DateTime<Utc>,
}

// ============================================================================
// SESSION STORE
// ============================================================================

/// Concurrent map of live session tokens.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for the given account.
    pub fn issue(&self, user_id: i64, username: &str) -> String {
        let token = generate_session_token();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id,
                username: username.to_string(),
                created_at: Utc::now(),
            },
        );
        tracing::info!(username = %username, "session issued");
        token
    }

    /// Resolve a bearer token into a [`CurrentUser`].
    pub fn verify(&self, token: &str) -> ApiResult<CurrentUser> {
        let session = self
            .sessions
            .get(token)
            .ok_or_else(|| ApiError::invalid_token("Unknown or revoked session token"))?;
        Ok(CurrentUser {
            user_id: session.user_id,
            username: session.username.clone(),
            token: token.to_string(),
        })
    }

    /// Revoke a token. Revoking an unknown token is not an error.
    pub fn revoke(&self, token: &str) {
        if let Some((_, session)) = self.sessions.remove(token) {
            let age = Utc::now() - session.created_at;
            tracing::info!(
                username = %session.username,
                age_secs = age.num_seconds(),
                "session revoked"
            );
        }
    }

    /// Revoke every session belonging to `username` except `keep_token`.
    /// Used after a password change so other devices are logged out while
    /// the session that made the change stays live.
    pub fn revoke_user_except(&self, username: &str, keep_token: &str) {
        self.sessions
            .retain(|token, s| s.username != username || token == keep_token);
    }

    /// Revoke every session (users table reset).
    pub fn revoke_all(&self) {
        self.sessions.clear();
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Generate an opaque session token.
fn generate_session_token() -> String {
    format!("sess_{}", Uuid::new_v4().simple())
}

/// Extract the bearer token from an `Authorization` header value.
pub fn bearer_token(header_value: &str) -> ApiResult<&str> {
    header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::invalid_token("Authorization header must use Bearer scheme"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let store = SessionStore::new();
        let token = store.issue(1, "alice");

        let user = store.verify(&token).unwrap();
        assert_eq!(user.user_id, 1);
        assert_eq!(user.username, "alice");
        assert_eq!(user.token, token);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let t1 = store.issue(1, "alice");
        let t2 = store.issue(1, "alice");
        assert_ne!(t1, t2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_verify_unknown_token() {
        let store = SessionStore::new();
        let err = store.verify("sess_nope").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidToken);
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new();
        let token = store.issue(1, "alice");
        store.revoke(&token);
        assert!(store.verify(&token).is_err());
        // Revoking again is a no-op
        store.revoke(&token);
    }

    #[test]
    fn test_revoke_user_except_keeps_current_session() {
        let store = SessionStore::new();
        let t1 = store.issue(1, "alice");
        let t2 = store.issue(1, "alice");
        let t3 = store.issue(2, "bob");

        store.revoke_user_except("alice", &t2);

        assert!(store.verify(&t1).is_err());
        assert!(store.verify(&t2).is_ok());
        assert!(store.verify(&t3).is_ok());
    }

    #[test]
    fn test_revoke_all() {
        let store = SessionStore::new();
        let t1 = store.issue(1, "alice");
        let t2 = store.issue(2, "bob");

        store.revoke_all();

        assert!(store.verify(&t1).is_err());
        assert!(store.verify(&t2).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer sess_abc").unwrap(), "sess_abc");
        assert!(bearer_token("Basic sess_abc").is_err());
        assert!(bearer_token("sess_abc").is_err());
    }

    #[test]
    fn test_token_format() {
        let store = SessionStore::new();
        let token = store.issue(1, "alice");
        assert!(token.starts_with("sess_"));
        // uuid simple form: 32 hex chars after the prefix
        assert_eq!(token.len(), 5 + 32);
    }
}
