//! Business error taxonomy
//!
//! Every service operation fails with one of these kinds. Messages are
//! user-facing and returned verbatim by the HTTP layer.

use thiserror::Error;

use crate::data::DataError;

/// Message shown whenever a request cannot be tied to a user
pub const UNAUTHORIZED_MESSAGE: &str = "Acceso no autorizado. Se requiere token de sesión.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violated (duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or unknown caller
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Business rule not yet satisfied (challenge target not reached)
    #[error("{0}")]
    PreconditionFailed(String),

    /// Reward was already granted
    #[error("{0}")]
    AlreadyCompleted(String),

    /// Storage failure or broken reference data; the write was rolled back
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    /// Log a storage failure and hide it behind a generic message
    pub fn from_data(e: DataError, message: &str) -> Self {
        tracing::error!(error = %e, "{}", message);
        Self::Internal(message.to_string())
    }

    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PreconditionFailed(_) => "PRECONDITION_FAILED",
            Self::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
