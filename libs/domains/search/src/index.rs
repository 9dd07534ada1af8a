use async_trait::async_trait;

use crate::error::SearchResult;
use crate::models::{Embedding, Match, Namespace};

/// Handle to one fixed index of the hosted vector database.
///
/// Implementations are stateless from the caller's perspective and safe to
/// share across concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Namespaces present in the index with their record counts
    async fn list_namespaces(&self) -> SearchResult<Vec<Namespace>>;

    /// Embed a query string with the configured model
    async fn embed(&self, text: &str) -> SearchResult<Embedding>;

    /// Nearest-neighbour query scoped to one namespace.
    ///
    /// Returns `NamespaceNotFound` when the index reports the namespace as
    /// missing or inaccessible.
    async fn query(&self, namespace: &str, vector: Vec<f32>, top_k: u32)
    -> SearchResult<Vec<Match>>;
}
