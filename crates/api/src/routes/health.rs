//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use payroll_config_core::lifecycle::EntityKind;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Path segments of the configuration kinds being served.
    pub kinds: Vec<&'static str>,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        kinds: EntityKind::ALL.iter().map(EntityKind::slug).collect(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
