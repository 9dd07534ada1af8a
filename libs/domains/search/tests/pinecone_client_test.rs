//! PineconeIndex against a local server impersonating the control, data,
//! and inference planes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use domain_search::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

#[derive(Default)]
struct FakePinecone {
    describe_calls: AtomicUsize,
    base_url: std::sync::OnceLock<String>,
    /// Selects the embed response shape: "values", "vector", or anything else for none
    embed_shape: std::sync::OnceLock<&'static str>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("Api-Key").and_then(|v| v.to_str().ok()) == Some("pk-test")
        && headers.contains_key("X-Pinecone-API-Version")
}

async fn describe_index(
    State(fake): State<Arc<FakePinecone>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    fake.describe_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if name != "ycaisus" {
        return StatusCode::NOT_FOUND.into_response();
    }
    let host = fake.base_url.get().cloned().unwrap_or_default();
    Json(json!({ "name": name, "host": host })).into_response()
}

async fn describe_index_stats(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "namespaces": {
            "startups": { "vectorCount": 42 },
            "papers": { "vectorCount": 7 }
        },
        "dimension": 1024,
        "totalVectorCount": 49
    }))
    .into_response()
}

async fn embed(State(fake): State<Arc<FakePinecone>>, Json(body): Json<Value>) -> Response {
    assert_eq!(body["model"], "multilingual-e5-large");
    assert_eq!(body["parameters"]["input_type"], "query");
    assert_eq!(body["parameters"]["truncate"], "END");

    match fake.embed_shape.get().copied().unwrap_or("values") {
        "values" => Json(json!({ "data": [{ "values": [0.25, 0.5] }] })).into_response(),
        "vector" => Json(json!({ "data": [{ "vector": [0.75] }] })).into_response(),
        _ => Json(json!({ "data": [] })).into_response(),
    }
}

async fn query(Json(body): Json<Value>) -> Response {
    assert_eq!(body["includeMetadata"], true);
    assert_eq!(body["includeValues"], false);

    if body["namespace"] == "ghost" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Namespace not found" })),
        )
            .into_response();
    }
    if body["namespace"] == "broken" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(json!({
        "matches": [
            { "id": "1", "score": 0.91, "metadata": { "text": "first", "url": "https://a.io" } },
            { "id": "2", "score": 0.42 }
        ],
        "namespace": body["namespace"]
    }))
    .into_response()
}

async fn spawn_fake(embed_shape: &'static str) -> (String, Arc<FakePinecone>) {
    let fake = Arc::new(FakePinecone::default());
    let _ = fake.embed_shape.set(embed_shape);

    let app = Router::new()
        .route("/indexes/{name}", get(describe_index))
        .route("/describe_index_stats", post(describe_index_stats))
        .route("/embed", post(embed))
        .route("/query", post(query))
        .with_state(fake.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let _ = fake.base_url.set(base_url.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, fake)
}

fn config(base_url: &str) -> PineconeConfig {
    PineconeConfig::new("pk-test".to_string())
        .with_control_plane_url(base_url.to_string())
        .with_inference_url(base_url.to_string())
        .with_timeout(5)
}

#[tokio::test]
async fn test_host_is_resolved_once_and_cached() {
    let (base_url, fake) = spawn_fake("values").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();

    let first = index.list_namespaces().await.unwrap();
    let second = index.list_namespaces().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![Namespace::new("papers", 7), Namespace::new("startups", 42)]
    );
    assert_eq!(fake.describe_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_configured_host_skips_control_plane() {
    let (base_url, fake) = spawn_fake("values").await;
    let index = PineconeIndex::new(config(&base_url).with_index_host(base_url.clone())).unwrap();

    index.list_namespaces().await.unwrap();
    assert_eq!(fake.describe_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_index_is_upstream_error() {
    let (base_url, _) = spawn_fake("values").await;
    let index =
        PineconeIndex::new(config(&base_url).with_index_name("missing".to_string())).unwrap();

    let err = index.list_namespaces().await.unwrap_err();
    assert!(matches!(err, SearchError::Upstream(_)));
}

#[tokio::test]
async fn test_embed_accepts_both_shapes() {
    let (base_url, _) = spawn_fake("values").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();
    assert_eq!(
        index.embed("hello").await.unwrap(),
        Embedding::Dense(vec![0.25, 0.5])
    );

    let (base_url, _) = spawn_fake("vector").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();
    assert_eq!(
        index.embed("hello").await.unwrap(),
        Embedding::Other(vec![0.75])
    );
}

#[tokio::test]
async fn test_embed_without_data_is_embedding_error() {
    let (base_url, _) = spawn_fake("none").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();

    let err = index.embed("hello").await.unwrap_err();
    assert!(matches!(err, SearchError::Embedding(_)));
}

#[tokio::test]
async fn test_query_returns_matches_with_metadata() {
    let (base_url, _) = spawn_fake("values").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();

    let matches = index.query("startups", vec![0.25, 0.5], 10).await.unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].id.as_deref(), Some("1"));
    assert_eq!(matches[0].field("text").as_deref(), Some("first"));
    assert!(matches[1].metadata.is_none());
}

#[tokio::test]
async fn test_query_failures_are_classified() {
    let (base_url, _) = spawn_fake("values").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();

    let err = index.query("ghost", vec![0.1], 10).await.unwrap_err();
    assert!(matches!(err, SearchError::NamespaceNotFound(ns) if ns == "ghost"));

    let err = index.query("broken", vec![0.1], 10).await.unwrap_err();
    assert!(matches!(err, SearchError::Upstream(_)));
}

#[tokio::test]
async fn test_full_pipeline_against_fake() {
    let (base_url, _) = spawn_fake("values").await;
    let index = PineconeIndex::new(config(&base_url)).unwrap();
    let service = SearchService::new(Some(index), &SearchSettings::default()).unwrap();

    let response = service.search("seed rounds", "startups").await.unwrap();

    assert_eq!(response.count, 2);
    assert!(response.results[0].contains("first"));
    assert!(response.results[0].contains("91.0%"));
    assert!(response.results[1].contains("No metadata available (Score: 42.0%)"));
}
