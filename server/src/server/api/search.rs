use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::app::SharedState;
use crate::pipeline::SearchRequest;
use crate::render;

use super::not_found_response;

/// GET /search?game=...&city=...
///
/// A repeated parameter resolves to its first occurrence.
pub async fn search(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    let request = match SearchRequest::from_params(
        first_param(&params, "game"),
        first_param(&params, "city"),
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!(error = %e, "Rejected search request");
            return not_found_response();
        }
    };

    tracing::info!(game = %request.game, city = %request.city, "Searching");
    let result = state.pipeline().run(&request).await;
    render::render_outcome(&result)
}

fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
