use axum::response::Html;

/// Upload form, text preview and audio player, compiled into the binary
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / - Serve the single-page client
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
