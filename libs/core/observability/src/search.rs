//! Search-pipeline metrics.

use metrics::{counter, histogram};

/// Terminal outcome of one pipeline invocation, used as a metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Success,
    InvalidRequest,
    NotConfigured,
    EmbeddingFailed,
    NamespaceNotFound,
    UpstreamError,
}

impl SearchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOutcome::Success => "success",
            SearchOutcome::InvalidRequest => "invalid_request",
            SearchOutcome::NotConfigured => "not_configured",
            SearchOutcome::EmbeddingFailed => "embedding_failed",
            SearchOutcome::NamespaceNotFound => "namespace_not_found",
            SearchOutcome::UpstreamError => "upstream_error",
        }
    }
}

/// Search metrics recorder
pub struct SearchMetrics;

impl SearchMetrics {
    /// Record one search request and how it ended.
    ///
    /// The namespace is client-supplied, so it goes to the trace event only
    /// and never becomes a metric label.
    pub fn record_search(namespace: &str, outcome: SearchOutcome, results: usize, duration_ms: u64) {
        counter!("search_queries_total", "outcome" => outcome.as_str()).increment(1);
        histogram!("search_query_duration_seconds", "outcome" => outcome.as_str())
            .record(duration_ms as f64 / 1000.0);

        if outcome == SearchOutcome::Success {
            histogram!("search_results_returned").record(results as f64);
        }

        tracing::debug!(
            namespace = namespace,
            outcome = outcome.as_str(),
            results = results,
            duration_ms = duration_ms,
            "Recorded search"
        );
    }

    /// Record one namespace directory listing
    pub fn record_namespace_listing(outcome: SearchOutcome, namespaces: usize) {
        counter!("namespace_listings_total", "outcome" => outcome.as_str()).increment(1);

        tracing::debug!(
            outcome = outcome.as_str(),
            namespaces = namespaces,
            "Recorded namespace listing"
        );
    }
}
