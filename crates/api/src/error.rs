//! API Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use triage::{InputError, TriageError};

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation
    #[error("{0}")]
    InvalidInput(#[from] InputError),

    /// Inference or session invariant failure
    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    /// Blocking evaluation task did not complete
    #[error("Evaluation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Input(e) => ApiError::InvalidInput(e),
            other => ApiError::Evaluation(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Evaluation(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}

/// Errors while starting the service
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid log level `{0}`")]
    LogLevel(String),

    #[error("Logging already initialized: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Invalid rate limit: per_second={per_second}, burst_size={burst_size}")]
    RateLimit { per_second: u64, burst_size: u32 },
}
