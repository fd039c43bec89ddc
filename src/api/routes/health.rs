//! Liveness endpoints.

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

/// Create the health router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
}

/// GET / - Service info.
async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "transcript-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// GET /health - Fixed liveness payload, no side effects.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
