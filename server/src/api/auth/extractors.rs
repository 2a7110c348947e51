//! Authenticated-user extractor for Axum handlers
//!
//! ```no_run
//! # use axum::Json;
//! # use ecotrack_server::api::auth::AuthUser;
//! pub async fn whoami(AuthUser(user_id): AuthUser) -> Json<i64> {
//!     Json(user_id)
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::api::types::ApiError;

/// Id of the user resolved by [`require_auth`](super::require_auth)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

/// Rejection type for [`AuthUser`]
#[derive(Debug)]
pub enum AuthRejection {
    /// Auth middleware not applied to the route
    MissingContext,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingContext => {
                tracing::error!("Handler requires auth but the auth middleware is missing");
                ApiError::internal("Auth context not available").into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AuthRejection::MissingContext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn test_extracts_injected_user() {
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(AuthUser(12));
        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user, AuthUser(12));
    }

    #[tokio::test]
    async fn test_missing_context_is_internal_error() {
        let (mut parts, _) = Request::new(()).into_parts();
        let rejection = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
