//! Error type for the identity service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by registration, login, and token checks
#[derive(Error, Debug)]
pub enum AuthError {
    /// No usable bearer token on the request
    #[error("Token is missing")]
    MissingToken,

    /// Signature, algorithm, or expiry check failed
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated but not allowed
    #[error("Forbidden: insufficient privileges")]
    Forbidden,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid role")]
    InvalidRole,

    #[error("Admin accounts cannot be self-registered")]
    AdminSignupDisabled,

    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Too many login attempts, try again later")]
    TooManyAttempts,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is required")]
    MissingParameter(String),

    /// Store failure; details stay in the server log
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden | AuthError::AdminSignupDisabled => StatusCode::FORBIDDEN,
            AuthError::InvalidRole | AuthError::Validation(_) | AuthError::MissingParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Identity store failure");
                "Database error".to_string()
            }
            AuthError::Internal(e) => {
                tracing::error!(error = %e, "Identity internal failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
