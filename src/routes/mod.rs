use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    catalog::Catalog,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::ProfileProvider,
};

pub mod catalog;
pub mod compare;

/// Shared application state
///
/// Built once by `main` and never mutated afterwards.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub profile_provider: Arc<dyn ProfileProvider>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, profile_provider: Arc<dyn ProfileProvider>) -> Self {
        Self {
            catalog,
            profile_provider,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/compare", post(compare::compare))
        .route("/catalog", get(catalog::summary))
}

/// CORS policy for browser clients
///
/// Restricted to `allowed_origin` when configured, open otherwise.
pub fn cors_layer(allowed_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
