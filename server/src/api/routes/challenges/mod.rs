//! Weekly challenge endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::domain::ChallengeService;
use crate::domain::challenges::completion_message;

use types::{ChallengeCompletedResponse, ChallengeDto, CompleteChallengeRequest};

#[derive(Clone)]
pub struct ChallengesApiState {
    pub challenges: Arc<ChallengeService>,
}

pub fn routes(challenges: Arc<ChallengeService>) -> Router {
    Router::new()
        .route("/challenges", get(list_challenges))
        .route("/challenges/complete", post(complete_challenge))
        .with_state(ChallengesApiState { challenges })
}

/// Every challenge with the caller's progress
#[utoipa::path(
    get,
    path = "/api/challenges",
    tag = "challenges",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Challenges with progress", body = Vec<ChallengeDto>),
        (status = 401, description = "Missing or invalid session", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn list_challenges(
    State(state): State<ChallengesApiState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ChallengeDto>>, ApiError> {
    let challenges = state.challenges.list_for_user(user_id).await?;
    Ok(Json(challenges.into_iter().map(Into::into).collect()))
}

/// Claim the reward of a challenge whose target was reached
#[utoipa::path(
    post,
    path = "/api/challenges/complete",
    tag = "challenges",
    security(("bearer" = [])),
    request_body = CompleteChallengeRequest,
    responses(
        (status = 200, description = "Reward granted", body = ChallengeCompletedResponse),
        (status = 400, description = "Target not reached or already claimed", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Unknown challenge", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn complete_challenge(
    State(state): State<ChallengesApiState>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(body): ValidatedJson<CompleteChallengeRequest>,
) -> Result<Json<ChallengeCompletedResponse>, ApiError> {
    let reward = state
        .challenges
        .complete(user_id, body.challenge_id)
        .await?;
    Ok(Json(ChallengeCompletedResponse {
        message: completion_message(reward),
        points: reward,
    }))
}
