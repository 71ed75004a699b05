use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{CompareRequest, CompareResponse},
    routes::AppState,
    services::compare,
};

/// Handler for the compare endpoint
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CompareRequest>,
) -> AppResult<Json<CompareResponse>> {
    tracing::info!(
        request_id = %request_id,
        username = ?request.username,
        catalog_titles = state.catalog.len(),
        "Processing compare request"
    );

    let response = compare::compare_profile(
        &state.catalog,
        state.profile_provider.as_ref(),
        request.username.as_deref(),
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        username = %response.username,
        watchlist_matches = response.watchlist.matches.len(),
        watched_matches = response.watched.matches.len(),
        "Compare completed"
    );

    Ok(Json(response))
}
