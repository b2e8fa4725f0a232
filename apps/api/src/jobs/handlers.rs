//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};

use crate::jobs::models::{SearchQuery, SearchResults};
use crate::state::AppState;

/// POST /api/v1/jobs/search
///
/// Runs the matcher directly, without going through the agent. Never fails:
/// an unmatched query returns the random fallback sample.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(query): Json<SearchQuery>,
) -> Json<SearchResults> {
    Json(state.matcher.search(&query))
}
