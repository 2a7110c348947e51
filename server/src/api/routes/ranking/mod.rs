//! Community ranking endpoint

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::types::ApiError;
use crate::domain::RankingService;

use types::RankingResponse;

#[derive(Clone)]
pub struct RankingApiState {
    pub ranking: Arc<RankingService>,
}

pub fn routes(ranking: Arc<RankingService>) -> Router {
    Router::new()
        .route("/ranking", get(get_ranking))
        .with_state(RankingApiState { ranking })
}

/// Top users by points and the caller's own rank
#[utoipa::path(
    get,
    path = "/api/ranking",
    tag = "ranking",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Leaderboard", body = RankingResponse),
        (status = 401, description = "Missing or invalid session", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn get_ranking(
    State(state): State<RankingApiState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RankingResponse>, ApiError> {
    let board = state.ranking.leaderboard(user_id).await?;
    Ok(Json(board.into()))
}
