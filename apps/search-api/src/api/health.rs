//! Readiness check backed by the vector index.

use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_search::{SearchService, VectorIndex};
use std::sync::Arc;

/// Readiness check endpoint: the index must be configured and answer a stats call.
pub async fn ready_handler<I: VectorIndex>(State(service): State<Arc<SearchService<I>>>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "vector_index",
        Box::pin(async {
            service
                .health_check()
                .await
                .map_err(|e| format!("Vector index check failed: {}", e))
        }),
    )];

    run_health_checks(checks).await
}
