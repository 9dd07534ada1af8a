//! HTTP handlers for search and the namespace directory

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use axum_helpers::{AppError, ErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SearchResult;
use crate::index::VectorIndex;
use crate::models::{NamespaceDirectory, SearchRequest, SearchResponse};
use crate::service::SearchService;

/// OpenAPI documentation for the search API
#[derive(OpenApi)]
#[openapi(
    paths(list_namespaces, search_directory, search),
    components(schemas(SearchRequest, SearchResponse, NamespaceDirectory, ErrorResponse)),
    tags(
        (name = "search", description = "Namespace-scoped semantic search")
    )
)]
pub struct SearchApiDoc;

/// Create router for search handlers
pub fn router<I: VectorIndex + 'static>(service: Arc<SearchService<I>>) -> Router {
    Router::new()
        .route("/namespaces", get(list_namespaces::<I>))
        .route("/search", get(search_directory::<I>).post(search::<I>))
        .with_state(service)
}

/// List namespaces in the index with record counts
#[utoipa::path(
    get,
    path = "/namespaces",
    tag = "search",
    responses(
        (status = 200, description = "Namespace directory", body = NamespaceDirectory),
        (status = 500, description = "Index not configured or unreachable", body = ErrorResponse)
    )
)]
pub async fn list_namespaces<I: VectorIndex>(
    State(service): State<Arc<SearchService<I>>>,
) -> SearchResult<Json<NamespaceDirectory>> {
    let directory = service.list_namespaces().await?;
    Ok(Json(directory))
}

/// Namespace directory, served on GET of the search path
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    responses(
        (status = 200, description = "Namespace directory", body = NamespaceDirectory),
        (status = 500, description = "Index not configured or unreachable", body = ErrorResponse)
    )
)]
pub async fn search_directory<I: VectorIndex>(
    state: State<Arc<SearchService<I>>>,
) -> SearchResult<Json<NamespaceDirectory>> {
    list_namespaces(state).await
}

/// Embed a query and search one namespace
#[utoipa::path(
    post,
    path = "/search",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Rendered results", body = SearchResponse),
        (status = 400, description = "Query or namespace missing", body = ErrorResponse),
        (status = 404, description = "Namespace not found or inaccessible", body = ErrorResponse),
        (status = 500, description = "Embedding failure, missing configuration, or upstream error", body = ErrorResponse)
    )
)]
pub async fn search<I: VectorIndex>(
    State(service): State<Arc<SearchService<I>>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let response = service
        .search(
            request.query.as_deref().unwrap_or_default(),
            request.namespace.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(response))
}
