//! Mapping of domain failures onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payroll_config_core::lifecycle::LifecycleError;
use serde_json::json;
use tracing::{error, warn};

/// Builds the `{"error", "message"}` body used by every failure.
pub fn error_body(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into()
        })),
    )
        .into_response()
}

/// 400 for malformed query parameters or path ids.
pub fn bad_request(message: impl Into<String>) -> Response {
    error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
}

/// Converts a lifecycle failure into its response.
///
/// Storage failures are logged and their detail is kept out of the body.
pub fn lifecycle_error_response(e: LifecycleError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match &e {
        LifecycleError::Storage(detail) => {
            error!(error = %detail, "Configuration storage failed");
            error_body(status, e.error_code(), "An error occurred")
        }
        LifecycleError::Conflict(_) | LifecycleError::InUse { .. } => {
            warn!(error = %e, "Configuration request conflicted");
            error_body(status, e.error_code(), e.to_string())
        }
        _ => error_body(status, e.error_code(), e.to_string()),
    }
}
