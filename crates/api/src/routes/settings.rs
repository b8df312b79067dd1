//! Company settings routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use payroll_config_core::settings::{CompanySettingsService, SettingsPatch};
use payroll_config_shared::SettingsId;
use uuid::Uuid;

use crate::AppState;
use crate::error::{error_body, lifecycle_error_response};

/// Creates the company settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/company-settings",
            get(get_settings).put(upsert_settings),
        )
        .route("/company-settings/{id}", patch(update_settings))
}

/// PUT `/company-settings` - Create or merge the settings.
async fn upsert_settings(
    State(service): State<Arc<CompanySettingsService>>,
    Json(payload): Json<SettingsPatch>,
) -> Response {
    match service.upsert(payload).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}

/// GET `/company-settings` - Current settings.
async fn get_settings(State(service): State<Arc<CompanySettingsService>>) -> Response {
    match service.current().await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => error_body(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Company settings have not been configured",
        ),
        Err(e) => lifecycle_error_response(e),
    }
}

/// PATCH `/company-settings/{id}` - Merge into a specific settings record.
async fn update_settings(
    State(service): State<Arc<CompanySettingsService>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SettingsPatch>,
) -> Response {
    match service.update(SettingsId::from_uuid(id), payload).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}
