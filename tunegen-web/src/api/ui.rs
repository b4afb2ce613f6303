//! UI serving routes
//!
//! Serves the static HTML page for the song recommender

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
///
/// Serves the main UI page; no state changes.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
