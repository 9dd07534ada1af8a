use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A named partition of the vector index with its approximate record count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Namespace {
    pub name: String,
    pub record_count: u64,
}

impl Namespace {
    pub fn new(name: impl Into<String>, record_count: u64) -> Self {
        Self {
            name: name.into(),
            record_count,
        }
    }
}

/// Query embedding as returned by the inference endpoint.
///
/// The endpoint answers with either a `values` array (dense models) or a
/// `vector` array. Both carry the same ordered floats.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedding {
    Dense(Vec<f32>),
    Other(Vec<f32>),
}

impl Embedding {
    pub fn dimension(&self) -> usize {
        match self {
            Embedding::Dense(values) | Embedding::Other(values) => values.len(),
        }
    }

    pub fn into_values(self) -> Vec<f32> {
        match self {
            Embedding::Dense(values) | Embedding::Other(values) => values,
        }
    }
}

/// One similarity-search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: Option<String>,
    /// Similarity score; not clamped, absent scores count as 0
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl Match {
    pub fn new(score: f64) -> Self {
        Self {
            id: None,
            score,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        if let Value::Object(map) = metadata {
            self.metadata = Some(map);
        }
        self
    }

    /// Metadata field as display text; null, `false`, zero and empty strings
    /// count as absent
    pub fn field(&self, key: &str) -> Option<String> {
        match self.metadata.as_ref()?.get(key)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// ===== HTTP DTOs =====

/// Search request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Rendered search results for one query
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// HTML fragments, one per match, in index order
    pub results: Vec<String>,
    pub count: usize,
    pub query: String,
    pub namespace: String,
}

/// Namespaces currently present in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceDirectory {
    pub namespaces: Vec<String>,
    pub namespace_stats: BTreeMap<String, u64>,
    pub count: usize,
}

impl From<Vec<Namespace>> for NamespaceDirectory {
    fn from(namespaces: Vec<Namespace>) -> Self {
        let namespace_stats = namespaces
            .iter()
            .map(|ns| (ns.name.clone(), ns.record_count))
            .collect();
        let names: Vec<String> = namespaces.into_iter().map(|ns| ns.name).collect();

        Self {
            count: names.len(),
            namespaces: names,
            namespace_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_directory_preserves_index_order() {
        let directory = NamespaceDirectory::from(vec![Namespace::new("a", 3), Namespace::new("b", 0)]);

        assert_eq!(directory.namespaces, vec!["a", "b"]);
        assert_eq!(directory.namespace_stats.get("a"), Some(&3));
        assert_eq!(directory.namespace_stats.get("b"), Some(&0));
        assert_eq!(directory.count, 2);
    }

    #[test]
    fn test_directory_serializes_camel_case() {
        let directory = NamespaceDirectory::from(vec![Namespace::new("a", 3)]);
        let value = serde_json::to_value(&directory).unwrap();

        assert_eq!(
            value,
            json!({ "namespaces": ["a"], "namespaceStats": { "a": 3 }, "count": 1 })
        );
    }

    #[test]
    fn test_match_tolerates_missing_fields() {
        let m: Match = serde_json::from_value(json!({ "id": "v1" })).unwrap();
        assert_eq!(m.score, 0.0);
        assert!(m.metadata.is_none());
        assert_eq!(m.field("text"), None);
    }

    #[test]
    fn test_match_field_normalisation() {
        let m = Match::new(0.5).with_metadata(json!({
            "text": "",
            "title": null,
            "source": "wiki",
            "year": 2024,
            "draft": false,
            "pinned": true,
            "pages": 0,
            "weight": 0.0
        }));

        assert_eq!(m.field("text"), None);
        assert_eq!(m.field("title"), None);
        assert_eq!(m.field("source").as_deref(), Some("wiki"));
        assert_eq!(m.field("year").as_deref(), Some("2024"));
        assert_eq!(m.field("draft"), None);
        assert_eq!(m.field("pinned").as_deref(), Some("true"));
        assert_eq!(m.field("pages"), None);
        assert_eq!(m.field("weight"), None);
    }

    #[test]
    fn test_embedding_variants_yield_same_values() {
        let dense = Embedding::Dense(vec![0.1, 0.2]);
        let other = Embedding::Other(vec![0.1, 0.2]);

        assert_eq!(dense.dimension(), 2);
        assert_eq!(dense.into_values(), other.into_values());
    }

    #[test]
    fn test_search_request_fields_are_optional() {
        let request: SearchRequest = serde_json::from_value(json!({ "query": "q" })).unwrap();
        assert_eq!(request.query.as_deref(), Some("q"));
        assert!(request.namespace.is_none());
    }
}
