//! Application error types.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use savor_core::auth::AuthError;
use savor_core::provider::ProviderError;
use savor_core::recipes::RecipeError;
use savor_core::store::StoreError;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database unavailable: {0}")]
    DbUnavailable(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::DbUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "db_unavailable", m.as_str())
            }
            AppError::ProviderUnavailable(m) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "provider_unavailable",
                m.as_str(),
            ),
            AppError::Provider(m) => (StatusCode::BAD_GATEWAY, "provider_error", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AppError::Conflict("User already exists".into()),
            StoreError::Db(
                e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)),
            ) => AppError::DbUnavailable(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::DuplicateEmail => AppError::Conflict("User already exists".into()),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RecipeError> for AppError {
    fn from(e: RecipeError) -> Self {
        match e {
            RecipeError::NotFound(_) => AppError::NotFound("User not found".into()),
            e @ (RecipeError::AlreadySaved(_) | RecipeError::RevisionConflict { .. }) => {
                AppError::Conflict(e.to_string())
            }
            RecipeError::Validation(msg) => AppError::Validation(msg),
            RecipeError::Store(e) => AppError::from(e),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotConfigured(_) => AppError::ProviderUnavailable(e.to_string()),
            ProviderError::InvalidRequest(msg) => AppError::Validation(msg),
            ProviderError::Status { status: 404, .. } => {
                AppError::NotFound("Recipe not found".into())
            }
            ProviderError::Config(msg) => AppError::Internal(msg),
            other => AppError::Provider(other.to_string()),
        }
    }
}
