use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::CatalogSummary, routes::AppState};

/// Handler for the catalog summary endpoint
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<CatalogSummary> {
    Json(state.catalog.summary())
}
