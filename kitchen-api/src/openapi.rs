//! OpenAPI document assembly.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::{ApiError, ErrorCode};
use crate::routes;
use crate::routes::StatusResponse;
use crate::services::CookoffSummary;
use kitchen_core::{Chef, CookoffResult, Cuisine, LeaderboardSort, NewChef};

/// Registers the bearer-token security scheme referenced by the route
/// annotations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chefs Kitchen API",
        description = "Chef management, kitchen roster, cookoffs, and leaderboard"
    ),
    paths(
        routes::health::ping,
        routes::health::liveness,
        routes::health::readiness,
        routes::user::create_user,
        routes::user::login,
        routes::user::logout,
        routes::user::change_password,
        routes::user::reset_users,
        routes::chef::create_chef,
        routes::chef::get_chef_by_id,
        routes::chef::get_chef_by_name,
        routes::chef::delete_chef,
        routes::chef::reset_chefs,
        routes::kitchen::enter_chef,
        routes::kitchen::get_all_chefs,
        routes::kitchen::clear_kitchen,
        routes::kitchen::cookoff,
        routes::leaderboard::get_leaderboard,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        StatusResponse,
        Chef,
        NewChef,
        Cuisine,
        CookoffResult,
        LeaderboardSort,
        CookoffSummary,
        routes::health::HealthResponse,
        routes::health::HealthStatus,
        routes::health::HealthDetails,
        routes::health::ComponentHealth,
        routes::user::CredentialsRequest,
        routes::user::LoginResponse,
        routes::user::ChangePasswordRequest,
        routes::kitchen::EnterChefRequest,
        routes::kitchen::CookoffRequest,
        routes::kitchen::RosterResponse,
        routes::leaderboard::LeaderboardResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Users", description = "Accounts and sessions"),
        (name = "Chefs", description = "Chef records"),
        (name = "Kitchen", description = "Roster and cookoffs"),
        (name = "Leaderboard", description = "Rankings"),
    )
)]
pub struct ApiDoc;
