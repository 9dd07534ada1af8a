use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use observability::SearchOutcome;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Pinecone API key not configured")]
    ServiceUnavailable,

    #[error("Failed to generate query embedding: {0}")]
    Embedding(String),

    #[error("Namespace '{0}' not found or inaccessible")]
    NamespaceNotFound(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// Metric label for the pipeline outcome this error ends with
    pub fn outcome(&self) -> SearchOutcome {
        match self {
            SearchError::InvalidRequest(_) => SearchOutcome::InvalidRequest,
            SearchError::ServiceUnavailable => SearchOutcome::NotConfigured,
            SearchError::Embedding(_) => SearchOutcome::EmbeddingFailed,
            SearchError::NamespaceNotFound(_) => SearchOutcome::NamespaceNotFound,
            SearchError::Upstream(_) | SearchError::Internal(_) => SearchOutcome::UpstreamError,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Upstream(format!("Pinecone request failed: {}", err))
    }
}

impl From<handlebars::RenderError> for SearchError {
    fn from(err: handlebars::RenderError) -> Self {
        SearchError::Internal(format!("Failed to render result: {}", err))
    }
}

impl From<handlebars::TemplateError> for SearchError {
    fn from(err: handlebars::TemplateError) -> Self {
        SearchError::Internal(format!("Invalid result template: {}", err))
    }
}

/// Convert SearchError to AppError for standardized HTTP error responses
impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        let message = err.to_string();
        match err {
            SearchError::InvalidRequest(_) => AppError::BadRequest(message),
            SearchError::ServiceUnavailable => AppError::NotConfigured(message),
            SearchError::Embedding(_) => AppError::Embedding(message),
            SearchError::NamespaceNotFound(_) => AppError::NamespaceNotFound(message),
            SearchError::Upstream(_) => AppError::Upstream(message),
            SearchError::Internal(_) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
