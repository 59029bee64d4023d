//! Chefs Kitchen API - REST API Layer
//!
//! Axum routes over the kitchen-storage stores: accounts and sessions,
//! chef records, the kitchen roster with its cookoff engine, and the
//! leaderboard.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use auth::{CurrentUser, SessionStore};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use middleware::{auth_middleware, AuthExtractor, AuthMiddlewareState};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::{CookoffSummary, Kitchen};
