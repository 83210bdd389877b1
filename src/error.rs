use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::recommend::RecommendError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No results: {0}")]
    NoResults(String),

    #[error("Catalog unavailable: {0}")]
    ApiUnavailable(String),
}

impl AppError {
    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NoResults(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ApiUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns a machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NoResults(_) => "NO_RESULTS",
            Self::ApiUnavailable(_) => "API_UNAVAILABLE",
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => Self::NotFound("no track matched the query".to_string()),
            // Upstream auth/throttle/transport failures are all recoverable
            // from the client's point of view. The detail stays in the debug
            // log; the response must not echo credential diagnostics.
            other => {
                tracing::debug!(error = %other, "catalog request failed");
                Self::ApiUnavailable("the music catalog is not responding, try again shortly".to_string())
            }
        }
    }
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::NoResults => {
                Self::NoResults("every candidate was filtered out, relax the filters".to_string())
            }
            RecommendError::CountOutOfRange { .. }
            | RecommendError::EmptyQuery
            | RecommendError::InvertedRange(_)
            | RecommendError::UnknownMood(_) => Self::InvalidInput(err.to_string()),
        }
    }
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
