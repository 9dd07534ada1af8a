//! Type-safe error codes for API responses.
//!
//! Each error code has:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NamespaceNotFound;
//! assert_eq!(code.as_str(), "NAMESPACE_NOT_FOUND");
//! assert_eq!(code.code(), 6001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Requested resource was not found
    NotFound,

    /// HTTP method is not supported by the route
    MethodNotAllowed,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    // Vector index errors (6000-6999)
    /// Namespace does not exist in the index or is not accessible
    NamespaceNotFound,

    /// Vector index credentials are not configured
    NotConfigured,

    /// Embedding generation failed or returned an unusable shape
    EmbeddingFailed,

    /// Any other failure reported by the vector index service
    UpstreamError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier clients can match on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::NamespaceNotFound => "NAMESPACE_NOT_FOUND",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::EmbeddingFailed => "EMBEDDING_FAILED",
            Self::UpstreamError => "UPSTREAM_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// Ranges:
    /// - 1000-1999: Client and generic server errors
    /// - 6000-6999: Vector index errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MethodNotAllowed => 1012,

            Self::NamespaceNotFound => 6001,
            Self::NotConfigured => 6002,
            Self::EmbeddingFailed => 6003,
            Self::UpstreamError => 6004,
        }
    }

    /// Default user-facing message; handlers usually supply a specific one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "Internal server error",
            Self::NamespaceNotFound => "Namespace not found or inaccessible",
            Self::NotConfigured => "Vector index is not configured",
            Self::EmbeddingFailed => "Failed to generate query embedding",
            Self::UpstreamError => "Vector index request failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
