//! Request handlers.

pub mod search;

use axum::http::{StatusCode, Uri};
use axum::response::Html;

use crate::render;

/// 404 page with a link home.
pub fn not_found_response() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render::not_found_page()))
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    tracing::info!(path = %uri.path(), "No route, returning 404");
    not_found_response()
}
