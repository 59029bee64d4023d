//! Route modules and top-level router composition.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware as axum_middleware, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kitchen_storage::Database;

use crate::auth::SessionStore;
use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, AuthMiddlewareState};
use crate::services::Kitchen;

pub mod chef;
pub mod health;
pub mod kitchen;
pub mod leaderboard;
pub mod user;

// ============================================================================
// SHARED TYPES
// ============================================================================

/// Simple acknowledgement body used by mutation routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        // Dev mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Build the full API router.
///
/// Health, registration, and login are public; everything else sits
/// behind the session-auth middleware.
pub fn create_api_router(db: Database, config: &ApiConfig) -> Router {
    let sessions = Arc::new(SessionStore::new());
    let kitchen = Arc::new(Kitchen::new(
        db.chefs(),
        config.kitchen_capacity,
        config.chef_cache_ttl,
    ));

    let auth_state = AuthMiddlewareState::new(sessions.clone());
    let user_state = Arc::new(user::UserState::new(db.clone(), sessions));
    let chef_state = Arc::new(chef::ChefState::new(db.clone()));
    let kitchen_state = kitchen::KitchenState { kitchen };
    let leaderboard_state = Arc::new(leaderboard::LeaderboardState { chefs: db.chefs() });

    let protected = Router::new()
        .nest("/api", user::protected_router(user_state.clone()))
        .nest("/api/chef", chef::create_router(chef_state))
        .nest("/api/kitchen", kitchen::create_router(kitchen_state))
        .nest("/api", leaderboard::create_router(leaderboard_state))
        .layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let router = Router::new()
        .nest("/api/health", health::create_router(db.clone()))
        .nest("/api", user::public_router(user_state))
        .merge(protected);

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", {
                use utoipa::OpenApi;
                crate::openapi::ApiDoc::openapi()
            }),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

// ============================================================================
// TESTS
// ============================================================================
