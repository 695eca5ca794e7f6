//! HTTP handlers, grouped by resource.

pub mod cheatsheets;
pub mod translate;
pub mod user;
pub mod words;

use axum::{response::IntoResponse, Json};

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
