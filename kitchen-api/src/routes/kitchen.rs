//! Kitchen Routes
//!
//! Roster management and the cookoff itself. All routes require an
//! authenticated session.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kitchen_core::{Chef, ChefId, Cuisine};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthExtractor,
    routes::StatusResponse,
    services::{CookoffSummary, Kitchen},
};

// ============================================================================
// TYPES
// ============================================================================

/// Request body for entering a chef into the kitchen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EnterChefRequest {
    pub chef_id: ChefId,
}

/// Request body for starting a cookoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CookoffRequest {
    /// One of the accepted cuisines (e.g. "Italian").
    pub cuisine: String,
}

/// Current roster, resolved to chef rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RosterResponse {
    pub chefs: Vec<Chef>,
}

// ============================================================================
// SHARED STATE
// ============================================================================

#[derive(Clone)]
pub struct KitchenState {
    pub kitchen: Arc<Kitchen>,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/kitchen/enter-chef - Add a chef to the kitchen roster
#[utoipa::path(
    post,
    path = "/api/kitchen/enter-chef",
    tag = "Kitchen",
    request_body = EnterChefRequest,
    responses(
        (status = 200, description = "Chef entered the kitchen", body = Chef),
        (status = 404, description = "Chef not found", body = ApiError),
        (status = 409, description = "Kitchen full or chef already present", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn enter_chef(
    State(state): State<KitchenState>,
    Json(req): Json<EnterChefRequest>,
) -> ApiResult<Json<Chef>> {
    let chef = state.kitchen.enter(req.chef_id)?;
    Ok(Json(chef))
}

/// GET /api/kitchen/get-all-chefs - Chefs currently in the kitchen
#[utoipa::path(
    get,
    path = "/api/kitchen/get-all-chefs",
    tag = "Kitchen",
    responses(
        (status = 200, description = "Current roster", body = RosterResponse),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_all_chefs(State(state): State<KitchenState>) -> ApiResult<Json<RosterResponse>> {
    let chefs = state.kitchen.roster_chefs()?;
    Ok(Json(RosterResponse { chefs }))
}

/// POST /api/kitchen/clear-kitchen - Empty the roster
#[utoipa::path(
    post,
    path = "/api/kitchen/clear-kitchen",
    tag = "Kitchen",
    responses(
        (status = 200, description = "Kitchen cleared", body = StatusResponse),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn clear_kitchen(
    State(state): State<KitchenState>,
    AuthExtractor(user): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    tracing::info!(requested_by = %user.username, "clear kitchen");
    state.kitchen.clear()?;
    Ok(Json(StatusResponse::ok("Kitchen cleared")))
}

/// POST /api/kitchen/cookoff - Run a cookoff in the given cuisine
#[utoipa::path(
    post,
    path = "/api/kitchen/cookoff",
    tag = "Kitchen",
    request_body = CookoffRequest,
    responses(
        (status = 200, description = "Cookoff finished", body = CookoffSummary),
        (status = 400, description = "Unknown cuisine", body = ApiError),
        (status = 409, description = "Not enough chefs in the kitchen", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn cookoff(
    State(state): State<KitchenState>,
    Json(req): Json<CookoffRequest>,
) -> ApiResult<Json<CookoffSummary>> {
    let cuisine: Cuisine = req.cuisine.parse().map_err(ApiError::from)?;
    let summary = state.kitchen.cookoff(cuisine)?;
    Ok(Json(summary))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

pub fn create_router(state: KitchenState) -> Router {
    Router::new()
        .route("/enter-chef", post(enter_chef))
        .route("/get-all-chefs", get(get_all_chefs))
        .route("/clear-kitchen", post(clear_kitchen))
        .route("/cookoff", post(cookoff))
        .with_state(state)
}
