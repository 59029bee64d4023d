//! User Account Routes
//!
//! Registration and login are public; logout, password changes, and the
//! destructive users-table reset require an authenticated session.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kitchen_core::StorageError;
use kitchen_storage::{Database, UserStore};

use crate::{
    auth::SessionStore,
    error::{ApiError, ApiResult},
    middleware::AuthExtractor,
    routes::StatusResponse,
};

// ============================================================================
// TYPES
// ============================================================================

/// Request body for account creation and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    pub username: String,
}

/// Request body for a password change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

// ============================================================================
// SHARED STATE
// ============================================================================

#[derive(Clone)]
pub struct UserState {
    pub db: Database,
    pub users: UserStore,
    pub sessions: Arc<SessionStore>,
}

impl UserState {
    pub fn new(db: Database, sessions: Arc<SessionStore>) -> Self {
        let users = db.users();
        Self {
            db,
            users,
            sessions,
        }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

fn require_credentials(req: &CredentialsRequest) -> ApiResult<()> {
    if req.username.trim().is_empty() {
        return Err(ApiError::missing_field("username"));
    }
    if req.password.is_empty() {
        return Err(ApiError::missing_field("password"));
    }
    Ok(())
}

/// PUT /api/create-user - Register a new account
#[utoipa::path(
    put,
    path = "/api/create-user",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = StatusResponse),
        (status = 400, description = "Missing username or password", body = ApiError),
        (status = 409, description = "Username already taken", body = ApiError),
    ),
)]
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<impl IntoResponse> {
    require_credentials(&req)?;
    state.users.create(&req.username, &req.password)?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::ok(format!(
            "User '{}' created successfully",
            req.username
        ))),
    ))
}

/// POST /api/login - Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ApiError),
    ),
)]
pub async fn login(
    State(state): State<Arc<UserState>>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<impl IntoResponse> {
    require_credentials(&req)?;

    // Unknown accounts answer the same way as bad passwords so login
    // responses do not reveal which usernames exist.
    let valid = match state.users.check_password(&req.username, &req.password) {
        Ok(valid) => valid,
        Err(StorageError::UserNotFound { .. }) => {
            tracing::warn!(username = %req.username, "login for unknown user");
            return Err(ApiError::unauthorized("Invalid username or password"));
        }
        Err(e) => return Err(e.into()),
    };
    if !valid {
        tracing::warn!(username = %req.username, "login with invalid password");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let user_id = state.users.id_by_username(&req.username)?;
    let token = state.sessions.issue(user_id, &req.username);

    Ok(Json(LoginResponse {
        token,
        username: req.username,
    }))
}

/// POST /api/logout - Revoke the presented session token
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Users",
    responses(
        (status = 200, description = "Session revoked", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn logout(
    State(state): State<Arc<UserState>>,
    AuthExtractor(user): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    state.sessions.revoke(&user.token);
    Ok(Json(StatusResponse::ok(format!(
        "User '{}' logged out",
        user.username
    ))))
}

/// POST /api/change-password - Update the caller's password
///
/// Other sessions for the account are revoked; the session that made the
/// change stays live.
#[utoipa::path(
    post,
    path = "/api/change-password",
    tag = "Users",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = StatusResponse),
        (status = 400, description = "Missing new password", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn change_password(
    State(state): State<Arc<UserState>>,
    AuthExtractor(user): AuthExtractor,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.new_password.is_empty() {
        return Err(ApiError::missing_field("new_password"));
    }

    state.users.update_password(&user.username, &req.new_password)?;
    state.sessions.revoke_user_except(&user.username, &user.token);

    Ok(Json(StatusResponse::ok("Password changed successfully")))
}

/// DELETE /api/reset-users - Drop and recreate the users table
///
/// Destructive: every account is deleted and every session revoked.
#[utoipa::path(
    delete,
    path = "/api/reset-users",
    tag = "Users",
    responses(
        (status = 200, description = "Users table recreated", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn reset_users(
    State(state): State<Arc<UserState>>,
    AuthExtractor(user): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    tracing::warn!(requested_by = %user.username, "recreating users table");
    state.db.reset_users()?;
    state.sessions.revoke_all();

    Ok(Json(StatusResponse::ok("Users table recreated successfully")))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Routes that work without a session.
pub fn public_router(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/create-user", put(create_user))
        .route("/login", post(login))
        .with_state(state)
}

/// Routes that require an authenticated session.
pub fn protected_router(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/reset-users", delete(reset_users))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = CredentialsRequest {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(require_credentials(&ok).is_ok());

        let no_user = CredentialsRequest {
            username: " ".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(require_credentials(&no_user).is_err());

        let no_pass = CredentialsRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(require_credentials(&no_pass).is_err());
    }

    #[test]
    fn test_login_response_serialization() -> Result<(), serde_json::Error> {
        let response = LoginResponse {
            token: "sess_abc".to_string(),
            username: "alice".to_string(),
        };
        let json = serde_json::to_string(&response)?;
        assert!(json.contains("sess_abc"));
        assert!(json.contains("alice"));
        Ok(())
    }
}
