//! Habit logging endpoint

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::domain::HabitService;

use types::{CreateHabitRequest, HabitCreatedResponse};

#[derive(Clone)]
pub struct HabitsApiState {
    pub habits: Arc<HabitService>,
}

pub fn routes(habits: Arc<HabitService>) -> Router {
    Router::new()
        .route("/habits", post(create_habit))
        .with_state(HabitsApiState { habits })
}

/// Log an eco-habit and credit its points and CO2
#[utoipa::path(
    post,
    path = "/api/habits",
    tag = "habits",
    security(("bearer" = [])),
    request_body = CreateHabitRequest,
    responses(
        (status = 201, description = "Habit recorded", body = HabitCreatedResponse),
        (status = 400, description = "Missing action or malformed field", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn create_habit(
    State(state): State<HabitsApiState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(body): ValidatedJson<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitCreatedResponse>), ApiError> {
    let award = state.habits.register(user_id, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(HabitCreatedResponse {
            message: "Hábito registrado con éxito",
            points: award.points,
            co2: award.co2,
        }),
    ))
}
