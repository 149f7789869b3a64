use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Describes the service and its endpoints.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Parser API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/upload": "POST - Upload and parse resume",
            "/health": "GET - Health check"
        }
    }))
}

/// GET /health
/// Returns a status object with service version and parser capabilities.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "name_recognition": state.parser.has_recognizer(),
        "skills_catalog_size": state.parser.catalog().len()
    }))
}
