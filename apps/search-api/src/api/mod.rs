use axum::{Router, middleware, routing::get};
use axum_helpers::security_headers;
use domain_search::{SearchService, VectorIndex};
use std::sync::Arc;

pub mod health;
pub mod page;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes<I: VectorIndex + 'static>(service: Arc<SearchService<I>>) -> Router {
    domain_search::handlers::router(service)
}

/// Creates a router with the /ready endpoint that checks the vector index.
pub fn ready_router<I: VectorIndex + 'static>(service: Arc<SearchService<I>>) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler::<I>))
        .with_state(service)
}

/// Serves the search page at `/`
///
/// Merged after `create_router`, so it carries its own security headers.
pub fn page_router() -> Router {
    Router::new()
        .route("/", get(page::index))
        .layer(middleware::from_fn(security_headers))
}
