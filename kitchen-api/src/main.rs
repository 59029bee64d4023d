//! Chefs Kitchen API Server Entry Point
//!
//! Bootstraps configuration, opens the SQLite database, and starts the
//! Axum HTTP server.

use std::net::SocketAddr;

use kitchen_api::{create_api_router, ApiConfig, ApiError, ApiResult};
use kitchen_storage::Database;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ApiConfig::from_env();

    ensure_db_dir(&config.db_path)?;
    let db = Database::open(&config.db_path)?;

    let app = create_api_router(db, &config);

    let addr = resolve_bind_addr(&config)?;
    tracing::info!(%addr, "Starting Chefs Kitchen API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn ensure_db_dir(db_path: &str) -> ApiResult<()> {
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::internal_error(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn resolve_bind_addr(config: &ApiConfig) -> ApiResult<SocketAddr> {
    let addr = format!("{}:{}", config.bind_host, config.bind_port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
