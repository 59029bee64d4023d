//! API Configuration Module
//!
//! Configuration is loaded from environment variables with sensible
//! defaults for development.

use std::time::Duration;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration: bind address, database location, kitchen limits,
/// and CORS.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host the server binds to.
    pub bind_host: String,

    /// Port the server binds to.
    pub bind_port: u16,

    /// Path to the SQLite database file.
    pub db_path: String,

    /// Maximum number of chefs allowed in the kitchen at once.
    pub kitchen_capacity: usize,

    /// Time-to-live for cached chef rows.
    pub chef_cache_ttl: Duration,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 5000,
            db_path: "instance/app.db".to_string(),
            kitchen_capacity: 20,
            chef_cache_ttl: Duration::from_secs(60),
            cors_origins: Vec::new(), // Empty = allow all
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `KITCHEN_BIND`: Host to bind (default: 0.0.0.0)
    /// - `KITCHEN_PORT` or `PORT`: Port to bind (default: 5000)
    /// - `KITCHEN_DB_PATH`: SQLite file path (default: instance/app.db)
    /// - `KITCHEN_CAPACITY`: Max chefs in the kitchen (default: 20)
    /// - `TTL`: Chef cache TTL in seconds (default: 60)
    /// - `KITCHEN_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_host =
            std::env::var("KITCHEN_BIND").unwrap_or(defaults.bind_host);

        let bind_port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("KITCHEN_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bind_port);

        let db_path =
            std::env::var("KITCHEN_DB_PATH").unwrap_or(defaults.db_path);

        let kitchen_capacity = std::env::var("KITCHEN_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.kitchen_capacity);

        let chef_cache_ttl = std::env::var("TTL")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.chef_cache_ttl);

        let cors_origins = std::env::var("KITCHEN_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_host,
            bind_port,
            db_path,
            kitchen_capacity,
            chef_cache_ttl,
            cors_origins,
        }
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            // Dev mode: allow all
            return true;
        }
        self.cors_origins.iter().any(|allowed| allowed == origin)
    }
}
