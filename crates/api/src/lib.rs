//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - One generic lifecycle route set per configuration kind
//! - Company settings routes
//! - Application state wiring over in-memory or PostgreSQL stores

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, DatabaseStores, MemoryStores, StoreProvider};

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/payroll-configuration", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
