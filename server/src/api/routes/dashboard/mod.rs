//! Dashboard API endpoint

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::types::ApiError;
use crate::domain::DashboardService;

use types::DashboardResponse;

#[derive(Clone)]
pub struct DashboardApiState {
    pub dashboard: Arc<DashboardService>,
}

pub fn routes(dashboard: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .with_state(DashboardApiState { dashboard })
}

/// Totals, weekly chart and badges for the current user
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "dashboard",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 401, description = "Missing or invalid session", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<DashboardApiState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = state.dashboard.summary(user_id).await?;
    Ok(Json(dashboard.into()))
}
