//! Bearer-token authentication middleware

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::extractors::AuthUser;
use super::jwt::JwtError;
use super::manager::AuthManager;
use crate::data::TransactionalService;
use crate::domain::error::UNAUTHORIZED_MESSAGE;

/// Authentication error response
#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub error: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl AuthError {
    fn unauthorized(code: &'static str, message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            code,
            message: message.to_string(),
        }
    }

    pub fn required() -> Self {
        Self::unauthorized("AUTH_REQUIRED", UNAUTHORIZED_MESSAGE)
    }

    pub fn expired() -> Self {
        Self::unauthorized("TOKEN_EXPIRED", "La sesión ha expirado.")
    }

    pub fn invalid() -> Self {
        Self::unauthorized("TOKEN_INVALID", "Token de sesión no válido.")
    }

    pub fn user_not_found() -> Self {
        Self::unauthorized("USER_NOT_FOUND", "Usuario no encontrado.")
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "internal_error",
            code: "INTERNAL",
            message: "Error al verificar la sesión.".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error,
            "code": self.code,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Shared auth state for middleware
#[derive(Clone)]
pub struct AuthState {
    pub auth_manager: Arc<AuthManager>,
    pub database: Arc<TransactionalService>,
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AuthError::required)?;

    let value = value.to_str().map_err(|_| AuthError::invalid())?;
    let (scheme, token) = value.split_once(' ').ok_or_else(AuthError::invalid)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::invalid());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::required());
    }
    Ok(token)
}

/// Authentication middleware
///
/// Validates the bearer JWT, confirms the user still exists and injects
/// [`AuthUser`] into request extensions.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = {
        let token = bearer_token(&request).inspect_err(|e| {
            tracing::debug!(code = e.code, path = %request.uri().path(), "Rejected request");
        })?;

        state.auth_manager.validate_session(token).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            match e {
                JwtError::Expired => AuthError::expired(),
                _ => AuthError::invalid(),
            }
        })?
    };

    let user_id = claims.user_id().map_err(|e| {
        tracing::debug!(error = %e, "Session token rejected");
        AuthError::invalid()
    })?;

    let exists = state
        .database
        .repository()
        .user_exists(user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to look up session user");
            AuthError::internal()
        })?;

    if !exists {
        tracing::debug!(user_id, "Session user no longer exists");
        return Err(AuthError::user_not_found());
    }

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}
