//! Request error mapping
//!
//! Every failure leaves the service as `{"error": message}`. Client input
//! problems keep their message; upstream model failures are logged in full
//! and surfaced generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scribe_analysis::{AnalysisError, ArchiveError};
use scribe_gemini::GeminiError;
use serde_json::json;

/// Service error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid client input
    #[error("{0}")]
    BadRequest(String),

    /// Named resource (e.g. a function) does not exist
    #[error("{0}")]
    NotFound(String),

    /// Model service failure
    #[error("model service failure: {0}")]
    Upstream(#[from] GeminiError),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // A non-upstream model error means our own setup is broken.
            AppError::Upstream(err) if err.is_upstream() => StatusCode::BAD_GATEWAY,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to the caller. Upstream and internal detail
    /// stays in the server log.
    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(m) | AppError::NotFound(m) => m.clone(),
            AppError::Upstream(_) => {
                "The model service failed to process the request.".to_string()
            }
            AppError::Internal(_) => "An internal error occurred.".to_string(),
        }
    }
}

impl From<ArchiveError> for AppError {
    fn from(err: ArchiveError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::FunctionNotFound(name) => {
                AppError::NotFound(format!("Function '{name}' not found."))
            }
            AnalysisError::Archive(archive) => archive.into(),
            AnalysisError::ParseFailed(detail) => {
                AppError::BadRequest(format!("Failed to parse code: {detail}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {self}");
        } else {
            tracing::debug!(status = status.as_u16(), "request rejected: {self}");
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}
