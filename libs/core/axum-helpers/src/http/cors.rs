use axum::http::{HeaderValue, Method, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer for the given origins.
///
/// The browser page is normally served from the same origin, so this layer is
/// only needed when the API is called from elsewhere.
///
/// # Returns
/// A configured `CorsLayer` with:
/// - The listed origins
/// - GET, POST and OPTIONS methods
/// - Content-Type and Accept headers
/// - 1 hour max age
///
/// # Errors
/// Fails if any origin is not a valid header value.
pub fn create_cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let allowed_origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600)))
}
