//! Observability utilities for the search service.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Search pipeline metrics
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, SearchMetrics, SearchOutcome};
//!
//! init_metrics()?;
//! SearchMetrics::record_search("startups", SearchOutcome::Success, 10, 120);
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod search;

pub use middleware::metrics_middleware;
pub use search::{SearchMetrics, SearchOutcome};

pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at startup; repeated calls return the existing handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Search metrics
    describe_counter!(
        "search_queries_total",
        "Search queries by outcome"
    );
    describe_histogram!(
        "search_query_duration_seconds",
        "End-to-end search pipeline duration in seconds"
    );
    describe_histogram!(
        "search_results_returned",
        "Number of results returned per successful search"
    );
    describe_counter!(
        "namespace_listings_total",
        "Namespace directory listings by outcome"
    );
}
