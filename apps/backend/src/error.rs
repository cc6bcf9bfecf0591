//! Error handling for the backend API

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flashcard_core::ScheduleError;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            ApiError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            ApiError::Migration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "migration_error"),
        };

        // Storage details stay in the logs.
        let message = match &self {
            ApiError::Validation(_) | ApiError::Persistence(_) => self.to_string(),
            _ => {
                tracing::error!(error = %self, "Request failed");
                "Unexpected error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// JSON body extractor that reports malformed or missing fields as
/// [`ApiError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}
