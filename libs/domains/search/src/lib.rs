//! Search Domain Library
//!
//! Namespace-aware semantic search over a hosted vector index (Pinecone).
//! A free-text query is embedded by the hosted inference endpoint, matched
//! against one namespace of a fixed index, and every match is rendered into
//! an HTML fragment for the browser.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │  HTTP handlers  │────▶│  SearchService  │  ← validate → embed → query → render
//! └─────────────────┘     └────────┬────────┘
//!                                  │
//!                 ┌────────────────┼────────────────┐
//!                 │                                 │
//!        ┌────────▼────────┐               ┌────────▼────────┐
//!        │   VectorIndex   │               │ ResultRenderer  │
//!        │     (trait)     │               │  (handlebars)   │
//!        └────────┬────────┘               └─────────────────┘
//!                 │
//!        ┌────────▼────────┐
//!        │  PineconeIndex  │  ← control plane, data plane, inference
//!        └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_search::{PineconeConfig, PineconeIndex, SearchService, SearchSettings};
//! use core_config::FromEnv;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index = PineconeIndex::new(PineconeConfig::from_env()?)?;
//! let service = SearchService::new(Some(index), &SearchSettings::default())?;
//!
//! let directory = service.list_namespaces().await?;
//! let response = service.search("rust web frameworks", &directory.namespaces[0]).await?;
//! println!("{} results", response.count);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod index;
pub mod models;
pub mod pinecone;
pub mod render;
pub mod service;

pub use config::SearchSettings;
pub use error::{SearchError, SearchResult};
pub use handlers::SearchApiDoc;
pub use index::VectorIndex;
pub use models::{Embedding, Match, Namespace, NamespaceDirectory, SearchRequest, SearchResponse};
pub use pinecone::{PineconeConfig, PineconeIndex};
pub use render::{MetadataEscaping, ResultRenderer};
pub use service::SearchService;
