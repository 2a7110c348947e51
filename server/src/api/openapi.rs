//! OpenAPI document

use axum::response::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::routes::{actions, auth, challenges, dashboard, habits, health, ranking};
use crate::api::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EcoTrack API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Eco-habit tracking with weekly challenges and a community ranking"
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "auth", description = "Registration and login"),
        (name = "dashboard", description = "Personal summary"),
        (name = "habits", description = "Eco-habit logging"),
        (name = "challenges", description = "Weekly challenges"),
        (name = "ranking", description = "Community leaderboard")
    ),
    paths(
        health::health,
        auth::register,
        auth::login,
        dashboard::get_dashboard,
        actions::list_actions,
        habits::create_habit,
        challenges::list_challenges,
        challenges::complete_challenge,
        ranking::get_ranking,
    ),
    components(schemas(
        ErrorResponse,
        health::HealthResponse,
        auth::CredentialsRequest,
        auth::SessionResponse,
        dashboard::types::DashboardResponse,
        dashboard::types::DashboardUserDto,
        dashboard::types::SummaryDto,
        dashboard::types::DayProgressDto,
        dashboard::types::AchievementDto,
        actions::ActionDto,
        habits::types::CreateHabitRequest,
        habits::types::HabitCreatedResponse,
        challenges::types::ChallengeDto,
        challenges::types::CompleteChallengeRequest,
        challenges::types::ChallengeCompletedResponse,
        ranking::types::RankingResponse,
        ranking::types::RankingEntryDto,
        ranking::types::PersonalRankDto,
    ))
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme the protected paths refer to
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
