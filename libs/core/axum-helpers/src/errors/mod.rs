pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Every error response carries:
/// - `error`: Human-readable error message
/// - `code`: Machine-readable error identifier (e.g., "NAMESPACE_NOT_FOUND")
/// - `details`: Optional additional error details
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Namespace 'docs' not found or inaccessible",
///   "code": "NAMESPACE_NOT_FOUND"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error identifier for programmatic handling
    pub code: ErrorCode,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Namespace Not Found: {0}")]
    NamespaceNotFound(String),

    #[error("Not Configured: {0}")]
    NotConfigured(String),

    #[error("Embedding Failed: {0}")]
    Embedding(String),

    #[error("Upstream Error: {0}")]
    Upstream(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status code and error code this error renders with.
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            AppError::NamespaceNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NamespaceNotFound),
            AppError::NotConfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::NotConfigured),
            AppError::Embedding(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::EmbeddingFailed),
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::UpstreamError),
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                msg
            }
            AppError::NamespaceNotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                msg
            }
            AppError::NotConfigured(msg) => {
                tracing::error!(error_code = code.code(), "Not configured: {}", msg);
                msg
            }
            AppError::Embedding(msg) | AppError::Upstream(msg) => {
                tracing::error!(error_code = code.code(), "Upstream failure: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                msg
            }
        };

        error_response(status, message, code)
    }
}

/// Helper function to create error responses.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "Query and namespace are required".to_string(),
///     ErrorCode::ValidationError,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        error: message,
        code: error_code,
        details: None,
    });

    (status, body).into_response()
}
