//! Axum Middleware for Session Authentication
//!
//! This middleware:
//! - Extracts the `Authorization: Bearer` header
//! - Verifies the token against the in-process session store
//! - Injects [`CurrentUser`] into request extensions
//! - Returns 401 for unauthenticated requests

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{bearer_token, CurrentUser, SessionStore};
use crate::error::ApiError;

// ============================================================================
// MIDDLEWARE STATE
// ============================================================================

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub sessions: Arc<SessionStore>,
}

impl AuthMiddlewareState {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }
}

// ============================================================================
// MIDDLEWARE FUNCTION
// ============================================================================

/// Authenticate the request and inject [`CurrentUser`] into extensions.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthMiddlewareError> {
    let header = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            AuthMiddlewareError(ApiError::unauthorized(
                "Authentication required: provide an Authorization header",
            ))
        })?;

    let token = bearer_token(header).map_err(AuthMiddlewareError)?;
    let user = state.sessions.verify(token).map_err(AuthMiddlewareError)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error wrapper for middleware that implements IntoResponse.
#[derive(Debug)]
pub struct AuthMiddlewareError(pub ApiError);

impl IntoResponse for AuthMiddlewareError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

// ============================================================================
// TYPED EXTRACTOR
// ============================================================================

/// Typed Axum extractor for the authenticated caller.
///
/// Requires `auth_middleware` on the route; without it the extractor
/// returns a 500 to flag the wiring mistake.
#[derive(Debug, Clone)]
pub struct AuthExtractor(pub CurrentUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthExtractor
where
    S: Send + Sync,
{
    type Rejection = AuthMiddlewareError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthExtractor)
            .ok_or_else(|| {
                AuthMiddlewareError(ApiError::internal_error(
                    "CurrentUser not found in request extensions. \
                     Ensure auth_middleware is applied to this route.",
                ))
            })
    }
}

impl std::ops::Deref for AuthExtractor {
    type Target = CurrentUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> (Router, Arc<SessionStore>) {
        let sessions = Arc::new(SessionStore::new());
        let auth_state = AuthMiddlewareState::new(sessions.clone());

        let app = Router::new()
            .route("/protected", get(|| async { "Protected resource" }))
            .layer(middleware::from_fn_with_state(auth_state, auth_middleware));
        (app, sessions)
    }

    #[tokio::test]
    async fn test_middleware_with_valid_token() -> Result<(), String> {
        let (app, sessions) = test_app();
        let token = sessions.issue(1, "alice");

        let request = Request::builder()
            .uri("/protected")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_middleware_without_authentication() -> Result<(), String> {
        let (app, _sessions) = test_app();

        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_middleware_with_unknown_token() -> Result<(), String> {
        let (app, _sessions) = test_app();

        let request = Request::builder()
            .uri("/protected")
            .header("authorization", "Bearer sess_unknown")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_middleware_with_malformed_header() -> Result<(), String> {
        let (app, sessions) = test_app();
        let token = sessions.issue(1, "alice");

        let request = Request::builder()
            .uri("/protected")
            .header("authorization", format!("Basic {}", token))
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_extractor_sees_current_user() -> Result<(), String> {
        let sessions = Arc::new(SessionStore::new());
        let auth_state = AuthMiddlewareState::new(sessions.clone());

        async fn handler(AuthExtractor(user): AuthExtractor) -> String {
            format!("User: {} (id {})", user.username, user.user_id)
        }

        let app = Router::new()
            .route("/protected", get(handler))
            .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

        let token = sessions.issue(7, "alice");
        let request = Request::builder()
            .uri("/protected")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| format!("Failed to read body: {:?}", e))?;
        let body_str = String::from_utf8(body.to_vec()).map_err(|e| e.to_string())?;

        assert!(body_str.contains("User: alice"));
        assert!(body_str.contains("id 7"));
        Ok(())
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_500() -> Result<(), String> {
        async fn handler(AuthExtractor(_user): AuthExtractor) -> String {
            "Should not reach here".to_string()
        }

        let app = Router::new().route("/unprotected", get(handler));

        let request = Request::builder()
            .uri("/unprotected")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }
}
