//! Axum middleware for the Chefs Kitchen API.

pub mod auth;

pub use auth::{auth_middleware, AuthExtractor, AuthMiddlewareState};
