use observability::{SearchMetrics, SearchOutcome};
use std::time::Instant;
use tracing::{debug, instrument, warn};

use crate::config::SearchSettings;
use crate::error::{SearchError, SearchResult};
use crate::index::VectorIndex;
use crate::models::{NamespaceDirectory, SearchResponse};
use crate::render::ResultRenderer;

const MISSING_FIELDS: &str = "Query and namespace are required";

/// Search service: the namespace-aware query pipeline and namespace directory.
///
/// The index is optional. Without one every operation fails with
/// [`SearchError::ServiceUnavailable`] before doing anything else.
pub struct SearchService<I: VectorIndex> {
    index: Option<I>,
    top_k: u32,
    renderer: ResultRenderer,
}

impl<I: VectorIndex> SearchService<I> {
    pub fn new(index: Option<I>, settings: &SearchSettings) -> SearchResult<Self> {
        Ok(Self {
            index,
            top_k: settings.top_k,
            renderer: ResultRenderer::new(settings.escaping)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.index.is_some()
    }

    fn index(&self) -> SearchResult<&I> {
        self.index.as_ref().ok_or(SearchError::ServiceUnavailable)
    }

    /// Embed `query`, search `namespace`, and render every match in index order.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn search(&self, query: &str, namespace: &str) -> SearchResult<SearchResponse> {
        let started = Instant::now();
        let result = self.run_search(query, namespace).await;

        let (outcome, results) = match &result {
            Ok(response) => (SearchOutcome::Success, response.count),
            Err(e) => {
                warn!(error = %e, "Search failed");
                (e.outcome(), 0)
            }
        };
        SearchMetrics::record_search(
            namespace,
            outcome,
            results,
            started.elapsed().as_millis() as u64,
        );

        result
    }

    async fn run_search(&self, query: &str, namespace: &str) -> SearchResult<SearchResponse> {
        let index = self.index()?;

        let text = query.trim();
        if text.is_empty() || namespace.trim().is_empty() {
            return Err(SearchError::InvalidRequest(MISSING_FIELDS.to_string()));
        }

        let embedding = index.embed(text).await.map_err(|e| match e {
            SearchError::Embedding(_) => e,
            other => SearchError::Embedding(other.to_string()),
        })?;
        debug!(dimension = embedding.dimension(), "Generated query embedding");

        let matches = index
            .query(namespace, embedding.into_values(), self.top_k)
            .await?;
        debug!(matches = matches.len(), "Vector query returned");

        let results = matches
            .iter()
            .map(|m| self.renderer.render(m))
            .collect::<SearchResult<Vec<_>>>()?;

        Ok(SearchResponse {
            count: results.len(),
            results,
            query: query.to_string(),
            namespace: namespace.to_string(),
        })
    }

    /// Namespaces in the index with their record counts.
    #[instrument(skip(self))]
    pub async fn list_namespaces(&self) -> SearchResult<NamespaceDirectory> {
        let result = match self.index() {
            Ok(index) => index.list_namespaces().await.map(NamespaceDirectory::from),
            Err(e) => Err(e),
        };

        match &result {
            Ok(directory) => {
                SearchMetrics::record_namespace_listing(SearchOutcome::Success, directory.count)
            }
            Err(e) => {
                warn!(error = %e, "Namespace listing failed");
                SearchMetrics::record_namespace_listing(e.outcome(), 0);
            }
        }

        result
    }

    /// Readiness check: configured and the index answers a stats call
    pub async fn health_check(&self) -> SearchResult<()> {
        self.index()?.list_namespaces().await.map(|_| ())
    }
}
