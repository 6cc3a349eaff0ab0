use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::mood::MoodTableError;
use crate::music::MusicError;
use crate::weather::WeatherError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Mood table error: {0}")]
    MoodTable(#[from] MoodTableError),

    #[error("Missing required field: {0}")]
    MissingInput(&'static str),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::MoodTable(_) | Self::Upstream(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns a machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::MoodTable(_) => "MOOD_TABLE_ERROR",
            Self::MissingInput(_) => "MISSING_INPUT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::NotFound(city) => Self::NotFound(format!("City '{city}' not found")),
            WeatherError::Malformed(_) => Self::Unexpected(err.to_string()),
            WeatherError::Http(_) | WeatherError::Status { .. } => Self::Upstream(err.to_string()),
        }
    }
}

impl From<MusicError> for AppError {
    fn from(err: MusicError) -> Self {
        match err {
            MusicError::Malformed(_) => Self::Unexpected(err.to_string()),
            MusicError::Http(_) | MusicError::Status { .. } => Self::Upstream(err.to_string()),
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
        if status.is_server_error() {
            warn!(code = self.code(), "{self}");
        }

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
