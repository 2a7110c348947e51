//! Catalogue of scored eco actions

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::auth::AuthUser;
use crate::domain::impact;

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionDto {
    pub action: &'static str,
    pub co2: f64,
    pub points: i64,
}

pub fn routes() -> Router {
    Router::new().route("/actions", get(list_actions))
}

/// Actions the impact table scores, with their CO2 and points
#[utoipa::path(
    get,
    path = "/api/actions",
    tag = "habits",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Scored actions", body = Vec<ActionDto>),
        (status = 401, description = "Missing or invalid session", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn list_actions(_user: AuthUser) -> Json<Vec<ActionDto>> {
    Json(
        impact::known_actions()
            .iter()
            .map(|(action, impact)| ActionDto {
                action: *action,
                co2: impact.co2,
                points: impact.points,
            })
            .collect(),
    )
}
