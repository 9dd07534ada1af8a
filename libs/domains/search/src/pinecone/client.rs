use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::PineconeConfig;
use crate::error::{SearchError, SearchResult};
use crate::index::VectorIndex;
use crate::models::{Embedding, Match, Namespace};

/// Pinecone-backed implementation of [`VectorIndex`]
pub struct PineconeIndex {
    client: Client,
    config: PineconeConfig,
    /// Data-plane base URL, resolved once through the control plane
    host: OnceCell<String>,
}

impl PineconeIndex {
    pub fn new(config: PineconeConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let host = OnceCell::new_with(config.index_host.as_deref().map(base_url));

        info!(index = %config.index_name, "Pinecone index client created");

        Ok(Self {
            client,
            config,
            host,
        })
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Api-Key", &self.config.api_key)
            .header("X-Pinecone-API-Version", &self.config.api_version)
    }

    async fn data_plane(&self) -> SearchResult<&str> {
        self.host
            .get_or_try_init(|| self.resolve_host())
            .await
            .map(String::as_str)
    }

    #[instrument(skip(self), fields(index = %self.config.index_name))]
    async fn resolve_host(&self) -> SearchResult<String> {
        let url = format!(
            "{}/indexes/{}",
            self.config.control_plane_url.trim_end_matches('/'),
            self.config.index_name
        );

        let response = self.request(Method::GET, url).send().await?;
        let response = ensure_success(response, "describe_index").await?;
        let description: IndexDescription = response.json().await?;

        let host = base_url(&description.host);
        debug!(host = %host, "Resolved index data-plane host");
        Ok(host)
    }
}

/// Normalise a configured or resolved host into a base URL without trailing slash
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

async fn ensure_success(response: Response, operation: &str) -> SearchResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(SearchError::Upstream(format!(
        "Pinecone {} failed ({}): {}",
        operation, status, body
    )))
}

/// Classify a failed query response
fn query_failure(namespace: &str, status: StatusCode, body: &str) -> SearchError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
            SearchError::NamespaceNotFound(namespace.to_string())
        }
        StatusCode::BAD_REQUEST if body.to_ascii_lowercase().contains("namespace") => {
            SearchError::NamespaceNotFound(namespace.to_string())
        }
        _ => SearchError::Upstream(format!("Pinecone query failed ({}): {}", status, body)),
    }
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(Debug, Default, Deserialize)]
struct IndexStats {
    #[serde(default)]
    namespaces: BTreeMap<String, NamespaceSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamespaceSummary {
    vector_count: Option<u64>,
    record_count: Option<u64>,
}

impl IndexStats {
    fn into_namespaces(self) -> Vec<Namespace> {
        self.namespaces
            .into_iter()
            .map(|(name, summary)| {
                let count = summary.vector_count.or(summary.record_count).unwrap_or(0);
                Namespace::new(name, count)
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    inputs: [EmbedInput<'a>; 1],
    parameters: EmbedParameters,
}

#[derive(Debug, Serialize)]
struct EmbedInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct EmbedParameters {
    input_type: &'static str,
    truncate: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    data: Vec<RawEmbedding>,
}

#[derive(Debug, Deserialize)]
struct RawEmbedding {
    values: Option<Vec<f32>>,
    vector: Option<Vec<f32>>,
}

impl RawEmbedding {
    fn into_embedding(self) -> SearchResult<Embedding> {
        let embedding = match (self.values, self.vector) {
            (Some(values), _) => Embedding::Dense(values),
            (None, Some(vector)) => Embedding::Other(vector),
            (None, None) => {
                return Err(SearchError::Embedding(
                    "Unsupported embedding format".to_string(),
                ));
            }
        };

        if embedding.dimension() == 0 {
            return Err(SearchError::Embedding("Embedding is empty".to_string()));
        }
        Ok(embedding)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    namespace: &'a str,
    vector: &'a [f32],
    top_k: u32,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

fn into_embedding_error(err: SearchError) -> SearchError {
    match err {
        SearchError::Embedding(_) => err,
        other => SearchError::Embedding(other.to_string()),
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self), fields(index = %self.config.index_name))]
    async fn list_namespaces(&self) -> SearchResult<Vec<Namespace>> {
        let url = format!("{}/describe_index_stats", self.data_plane().await?);

        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let response = ensure_success(response, "describe_index_stats").await?;
        let stats: IndexStats = response.json().await?;

        let namespaces = stats.into_namespaces();
        debug!(count = namespaces.len(), "Listed namespaces");
        Ok(namespaces)
    }

    #[instrument(skip(self, text), fields(model = %self.config.embed_model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> SearchResult<Embedding> {
        let url = format!(
            "{}/embed",
            self.config.inference_url.trim_end_matches('/')
        );
        let request = EmbedRequest {
            model: &self.config.embed_model,
            inputs: [EmbedInput { text }],
            parameters: EmbedParameters {
                input_type: "query",
                truncate: "END",
            },
        };

        let response = self
            .request(Method::POST, url)
            .json(&request)
            .send()
            .await
            .map_err(|e| into_embedding_error(e.into()))?;
        let response = ensure_success(response, "embed")
            .await
            .map_err(into_embedding_error)?;
        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Embedding(e.to_string()))?;

        body.data
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::Embedding("No embedding returned".to_string()))?
            .into_embedding()
    }

    #[instrument(skip(self, vector), fields(index = %self.config.index_name, dimension = vector.len()))]
    async fn query(
        &self,
        namespace: &str,
        vector: Vec<f32>,
        top_k: u32,
    ) -> SearchResult<Vec<Match>> {
        let url = format!("{}/query", self.data_plane().await?);
        let request = QueryRequest {
            namespace,
            vector: &vector,
            top_k,
            include_metadata: true,
            include_values: false,
        };

        let response = self.request(Method::POST, url).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(query_failure(namespace, status, &body));
        }

        let body: QueryResponse = response.json().await?;
        debug!(matches = body.matches.len(), "Query completed");
        Ok(body.matches)
    }
}
