//! Leaderboard Route

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use kitchen_core::{Chef, LeaderboardSort};
use kitchen_storage::ChefStore;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardQuery {
    /// Sort key: "wins" (default) or "win_pct".
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LeaderboardResponse {
    pub sort: LeaderboardSort,
    pub leaderboard: Vec<Chef>,
}

// ============================================================================
// SHARED STATE
// ============================================================================

#[derive(Clone)]
pub struct LeaderboardState {
    pub chefs: ChefStore,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/leaderboard - Chefs ranked by wins or win percentage
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "Leaderboard",
    params(("sort" = Option<String>, Query, description = "Sort key: wins or win_pct")),
    responses(
        (status = 200, description = "Ranked chefs", body = LeaderboardResponse),
        (status = 400, description = "Invalid sort key", body = ApiError),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn get_leaderboard(
    State(state): State<Arc<LeaderboardState>>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let sort = match query.sort.as_deref() {
        None => LeaderboardSort::default(),
        Some(raw) => raw.parse().map_err(ApiError::from)?,
    };

    tracing::info!(sort = %sort, "generating leaderboard");
    let leaderboard = state.chefs.leaderboard(sort)?;
    tracing::info!(count = leaderboard.len(), "leaderboard generated");

    Ok(Json(LeaderboardResponse { sort, leaderboard }))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

pub fn create_router(state: Arc<LeaderboardState>) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_wins() {
        assert_eq!(LeaderboardSort::default(), LeaderboardSort::Wins);
    }

    #[test]
    fn test_leaderboard_response_serialization() -> Result<(), serde_json::Error> {
        let response = LeaderboardResponse {
            sort: LeaderboardSort::WinPct,
            leaderboard: vec![],
        };
        let json = serde_json::to_string(&response)?;
        assert!(json.contains("win_pct"));
        Ok(())
    }
}
