//! Registration and login endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::domain::AccountService;

/// Credentials posted to register and login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "El correo electrónico no es válido."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "La contraseña es demasiado larga."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub message: &'static str,
    /// Bearer token for the `Authorization` header
    pub token: String,
}

#[derive(Clone)]
pub struct AuthRoutesState {
    pub accounts: Arc<AccountService>,
}

/// Create auth routes
pub fn routes(accounts: Arc<AccountService>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(AuthRoutesState { accounts })
}

/// Create an account and start a session
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AuthRoutesState>,
    ValidatedJson(body): ValidatedJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let token = state.accounts.register(&body.email, &body.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "Registro exitoso",
            token,
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = SessionResponse),
        (status = 400, description = "Missing fields", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthRoutesState>,
    ValidatedJson(body): ValidatedJson<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let token = state.accounts.login(&body.email, &body.password).await?;
    Ok(Json(SessionResponse {
        message: "Inicio de sesión exitoso",
        token,
    }))
}
