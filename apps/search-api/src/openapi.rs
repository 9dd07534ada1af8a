use domain_search::SearchApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Search API",
        version = "0.1.0",
        description = "Namespace-aware semantic search over a Pinecone index"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct ApiInfo;

/// Top-level API documentation served at /api-docs/openapi.json
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ApiInfo::openapi();
        doc.merge(SearchApiDoc::openapi());
        doc
    }
}
