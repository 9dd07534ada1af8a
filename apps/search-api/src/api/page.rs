use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Search page: namespace picker, query box, and result cards
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
