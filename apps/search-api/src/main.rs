use axum::{middleware, routing::get};
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_search::{PineconeIndex, SearchService};
use observability::{init_metrics, metrics_handler, metrics_middleware};
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    init_metrics().map_err(|e| eyre::eyre!("Failed to install metrics recorder: {}", e))?;

    // The index client is optional: without credentials the search routes
    // answer with NOT_CONFIGURED instead of failing startup
    let index = match config.pinecone.clone() {
        Some(pinecone) => {
            info!(
                index = %pinecone.index_name,
                model = %pinecone.embed_model,
                "Configuring Pinecone index client"
            );
            Some(PineconeIndex::new(pinecone)?)
        }
        None => {
            warn!("PINECONE_API_KEY not set; search endpoints will report the service as not configured");
            None
        }
    };

    let service = Arc::new(SearchService::new(index, &config.search)?);

    // create_router adds docs/middleware to our composed routes
    let router =
        create_router::<openapi::ApiDoc>(api::routes(service.clone()), &config.server)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the vector index
    // - /metrics: Prometheus exposition
    // - /: search page
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(service))
        .merge(api::page_router())
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware));

    info!(
        "Starting {} v{} ({:?})",
        config.app.name, config.app.version, config.environment
    );

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Search API shutdown complete");
    Ok(())
}
