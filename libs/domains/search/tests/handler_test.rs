//! Handler tests for the search domain
//!
//! These drive the search router directly with `oneshot` against a stub
//! index, covering request decoding, status codes, and error bodies.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_search::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt; // For oneshot()

/// What the stub's query call answers with
#[derive(Clone, Copy)]
enum QueryBehaviour {
    Matches,
    NamespaceMissing,
    Fails,
}

#[derive(Default)]
struct Calls {
    list: AtomicUsize,
    embed: AtomicUsize,
    query: AtomicUsize,
}

impl Calls {
    fn total(&self) -> usize {
        self.list.load(Ordering::SeqCst)
            + self.embed.load(Ordering::SeqCst)
            + self.query.load(Ordering::SeqCst)
    }
}

struct StubIndex {
    calls: Arc<Calls>,
    query: QueryBehaviour,
}

#[async_trait]
impl VectorIndex for StubIndex {
    async fn list_namespaces(&self) -> SearchResult<Vec<Namespace>> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Namespace::new("a", 3), Namespace::new("b", 0)])
    }

    async fn embed(&self, _text: &str) -> SearchResult<Embedding> {
        self.calls.embed.fetch_add(1, Ordering::SeqCst);
        Ok(Embedding::Dense(vec![0.1, 0.2]))
    }

    async fn query(
        &self,
        namespace: &str,
        _vector: Vec<f32>,
        _top_k: u32,
    ) -> SearchResult<Vec<Match>> {
        self.calls.query.fetch_add(1, Ordering::SeqCst);
        match self.query {
            QueryBehaviour::Matches => Ok(vec![
                Match::new(0.873).with_metadata(json!({
                    "text": "Hello",
                    "title": "T",
                    "url": "http://x",
                    "source": "S"
                })),
                Match::new(0.5),
            ]),
            QueryBehaviour::NamespaceMissing => {
                Err(SearchError::NamespaceNotFound(namespace.to_string()))
            }
            QueryBehaviour::Fails => Err(SearchError::Upstream("Pinecone query failed".into())),
        }
    }
}

fn app(behaviour: QueryBehaviour) -> (axum::Router, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let index = StubIndex {
        calls: calls.clone(),
        query: behaviour,
    };
    let service = SearchService::new(Some(index), &SearchSettings::default()).unwrap();
    (handlers::router(Arc::new(service)), calls)
}

fn unconfigured_app() -> axum::Router {
    let service = SearchService::<StubIndex>::new(None, &SearchSettings::default()).unwrap();
    handlers::router(Arc::new(service))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_search(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_search_returns_rendered_results() {
    let (app, calls) = app(QueryBehaviour::Matches);

    let response = app
        .oneshot(post_search(json!({ "query": "hello", "namespace": "a" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: SearchResponse = json_body(response.into_body()).await;
    assert_eq!(body.count, 2);
    assert_eq!(body.query, "hello");
    assert_eq!(body.namespace, "a");
    assert!(body.results[0].contains("87.3%"));
    assert!(body.results[0].contains("href=\"http://x\""));
    assert!(body.results[1].contains("50.0%"));
    assert_eq!(calls.embed.load(Ordering::SeqCst), 1);
    assert_eq!(calls.query.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_missing_fields_returns_400_without_upstream_calls() {
    for body in [
        json!({ "query": "", "namespace": "a" }),
        json!({ "query": "q" }),
        json!({}),
    ] {
        let (app, calls) = app(QueryBehaviour::Matches);

        let response = app.oneshot(post_search(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "Query and namespace are required");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(calls.total(), 0);
    }
}

#[tokio::test]
async fn test_search_malformed_json_returns_400() {
    let (app, calls) = app(QueryBehaviour::Matches);

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.total(), 0);
}

#[tokio::test]
async fn test_search_unknown_namespace_returns_404() {
    let (app, _) = app(QueryBehaviour::NamespaceMissing);

    let response = app
        .oneshot(post_search(json!({ "query": "q", "namespace": "ghost" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Namespace 'ghost' not found or inaccessible");
    assert_eq!(body["code"], "NAMESPACE_NOT_FOUND");
}

#[tokio::test]
async fn test_search_upstream_failure_returns_500() {
    let (app, _) = app(QueryBehaviour::Fails);

    let response = app
        .oneshot(post_search(json!({ "query": "q", "namespace": "a" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_search_unconfigured_returns_500() {
    let response = unconfigured_app()
        .oneshot(post_search(json!({ "query": "q", "namespace": "a" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Pinecone API key not configured");
    assert_eq!(body["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn test_list_namespaces_returns_directory() {
    for uri in ["/namespaces", "/search"] {
        let (app, calls) = app(QueryBehaviour::Matches);

        let response = app.oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(
            body,
            json!({
                "namespaces": ["a", "b"],
                "namespaceStats": { "a": 3, "b": 0 },
                "count": 2
            })
        );
        assert_eq!(calls.list.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn test_list_namespaces_unconfigured_returns_500() {
    let response = unconfigured_app().oneshot(get("/namespaces")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], "NOT_CONFIGURED");
}
