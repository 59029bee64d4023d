//! Chef Management Routes
//!
//! CRUD over chef records plus the destructive chefs-table reset. All
//! routes require an authenticated session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;

use kitchen_core::{Chef, ChefId, NewChef};
use kitchen_storage::{ChefStore, Database};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthExtractor,
    routes::StatusResponse,
};

// ============================================================================
// SHARED STATE
// ============================================================================

#[derive(Clone)]
pub struct ChefState {
    pub db: Database,
    pub chefs: ChefStore,
}

impl ChefState {
    pub fn new(db: Database) -> Self {
        let chefs = db.chefs();
        Self { db, chefs }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/chef/create-chef - Create a new chef
#[utoipa::path(
    post,
    path = "/api/chef/create-chef",
    tag = "Chefs",
    request_body = NewChef,
    responses(
        (status = 201, description = "Chef created", body = Chef),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Chef name already exists", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create_chef(
    State(state): State<Arc<ChefState>>,
    AuthExtractor(user): AuthExtractor,
    Json(req): Json<NewChef>,
) -> ApiResult<impl IntoResponse> {
    tracing::info!(requested_by = %user.username, name = %req.name, "create chef");
    let chef = state.chefs.create(&req)?;
    Ok((StatusCode::CREATED, Json(chef)))
}

/// GET /api/chef/get-chef/{id} - Fetch a chef by id
#[utoipa::path(
    get,
    path = "/api/chef/get-chef/{id}",
    tag = "Chefs",
    params(("id" = i64, Path, description = "Chef id")),
    responses(
        (status = 200, description = "Chef found", body = Chef),
        (status = 404, description = "Chef not found", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_chef_by_id(
    State(state): State<Arc<ChefState>>,
    Path(id): Path<ChefId>,
) -> ApiResult<Json<Chef>> {
    let chef = state.chefs.get(id)?;
    Ok(Json(chef))
}

/// GET /api/chef/get-chef-by-name/{name} - Fetch a chef by name
#[utoipa::path(
    get,
    path = "/api/chef/get-chef-by-name/{name}",
    tag = "Chefs",
    params(("name" = String, Path, description = "Chef name")),
    responses(
        (status = 200, description = "Chef found", body = Chef),
        (status = 404, description = "Chef not found", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_chef_by_name(
    State(state): State<Arc<ChefState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Chef>> {
    let chef = state.chefs.get_by_name(&name)?;
    Ok(Json(chef))
}

/// DELETE /api/chef/delete-chef/{id} - Delete a chef
#[utoipa::path(
    delete,
    path = "/api/chef/delete-chef/{id}",
    tag = "Chefs",
    params(("id" = i64, Path, description = "Chef id")),
    responses(
        (status = 200, description = "Chef deleted", body = StatusResponse),
        (status = 404, description = "Chef not found", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete_chef(
    State(state): State<Arc<ChefState>>,
    AuthExtractor(user): AuthExtractor,
    Path(id): Path<ChefId>,
) -> ApiResult<impl IntoResponse> {
    tracing::info!(requested_by = %user.username, chef_id = id, "delete chef");
    state.chefs.delete(id)?;
    Ok(Json(StatusResponse::ok(format!(
        "Chef {} deleted successfully",
        id
    ))))
}

/// DELETE /api/chef/reset-chefs - Drop and recreate the chefs table
///
/// Destructive: applying the drop-and-recreate script discards every
/// chef row.
#[utoipa::path(
    delete,
    path = "/api/chef/reset-chefs",
    tag = "Chefs",
    responses(
        (status = 200, description = "Chefs table recreated", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn reset_chefs(
    State(state): State<Arc<ChefState>>,
    AuthExtractor(user): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    tracing::warn!(requested_by = %user.username, "recreating chefs table");
    state.db.reset_chefs()?;
    Ok(Json(StatusResponse::ok("Chefs table recreated successfully")))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

pub fn create_router(state: Arc<ChefState>) -> Router {
    Router::new()
        .route("/create-chef", post(create_chef))
        .route("/get-chef/:id", get(get_chef_by_id))
        .route("/get-chef-by-name/:name", get(get_chef_by_name))
        .route("/delete-chef/:id", delete(delete_chef))
        .route("/reset-chefs", delete(reset_chefs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chef_serialization_round_trip() -> Result<(), serde_json::Error> {
        let chef = Chef {
            id: 1,
            name: "Gordon Ramsay".to_string(),
            specialty: "British".to_string(),
            years_experience: 25,
            signature_dishes: "Beef Wellington".to_string(),
            age: 55,
            wins: 2,
            cookoffs: 3,
        };

        let json = serde_json::to_string(&chef)?;
        let back: Chef = serde_json::from_str(&json)?;
        assert_eq!(back, chef);
        Ok(())
    }
}
