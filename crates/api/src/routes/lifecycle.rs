//! Generic lifecycle routes, mounted once per configuration kind.
//!
//! Every kind exposes the same seven operations under its own path segment;
//! the handlers only translate HTTP to [`LifecycleEngine`] calls.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use payroll_config_core::lifecycle::{
    ActorId, ConfigEntity, ConfigStatus, EntityKind, LifecycleEngine, ListFilter,
};
use payroll_config_shared::ConfigId;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{bad_request, lifecycle_error_response};

/// Creates the route set for kind `T`.
pub fn routes<T>() -> Router<AppState>
where
    T: ConfigEntity,
    Arc<LifecycleEngine<T>>: FromRef<AppState>,
{
    let collection = format!("/{}", T::KIND.slug());
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(
            &item,
            get(get_one::<T>).patch(update::<T>).delete(remove::<T>),
        )
        .route(&format!("{item}/approve"), post(approve::<T>))
        .route(&format!("{item}/reject"), post(reject::<T>))
}

// ============================================================================
// Request Types
// ============================================================================

/// Body of a create request: the kind's fields plus the optional author.
///
/// Any `status` sent by the client is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest<T> {
    /// Type-specific fields.
    #[serde(flatten)]
    pub fields: T,
    /// Who is creating the draft.
    #[serde(default)]
    pub created_by: Option<ActorId>,
}

/// Body of an approve request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequest {
    /// The approver.
    pub approved_by: ActorId,
}

/// Body of a reject request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequest {
    /// The rejecter.
    pub rejected_by: ActorId,
    /// Why the record is rejected.
    #[serde(alias = "rejectionReason")]
    pub reason: String,
}

/// Query parameters for list reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Status filter.
    pub status: Option<String>,
    /// Policy type filter, honored by payroll policies only.
    pub policy_type: Option<String>,
}

impl ListQuery {
    fn into_filter(self, kind: EntityKind) -> Result<ListFilter, Response> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                ConfigStatus::parse(raw)
                    .ok_or_else(|| bad_request(format!("Invalid status: {raw}")))?,
            ),
        };
        let category = self
            .policy_type
            .filter(|value| kind == EntityKind::PayrollPolicy && !value.is_empty());

        Ok(ListFilter { status, category })
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/{kind}` - Create a draft.
async fn create<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Json(payload): Json<CreateRequest<T>>,
) -> Response {
    match engine.create(payload.fields, payload.created_by).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}

/// GET `/{kind}` - List records, optionally filtered.
async fn list<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filter = match query.into_filter(T::KIND) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    match engine.list(&filter).await {
        Ok(records) => {
            let total = records.len();
            (
                StatusCode::OK,
                Json(json!({ "data": records, "total": total })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error_response(e),
    }
}

/// GET `/{kind}/{id}` - Load one record.
async fn get_one<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Path(id): Path<Uuid>,
) -> Response {
    match engine.get(ConfigId::from_uuid(id)).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}

/// PATCH `/{kind}/{id}` - Partially update a draft.
async fn update<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<T::Patch>,
) -> Response {
    match engine.update(ConfigId::from_uuid(id), patch).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}

/// DELETE `/{kind}/{id}` - Delete a draft.
async fn remove<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Path(id): Path<Uuid>,
) -> Response {
    match engine.delete(ConfigId::from_uuid(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}

/// POST `/{kind}/{id}/approve` - Approve a draft.
async fn approve<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveRequest>,
) -> Response {
    info!(kind = %T::KIND, id = %id, actor = %payload.approved_by, "Approval requested");
    match engine
        .approve(ConfigId::from_uuid(id), payload.approved_by)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}

/// POST `/{kind}/{id}/reject` - Reject a draft.
async fn reject<T: ConfigEntity>(
    State(engine): State<Arc<LifecycleEngine<T>>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Response {
    info!(kind = %T::KIND, id = %id, actor = %payload.rejected_by, "Rejection requested");
    match engine
        .reject(ConfigId::from_uuid(id), payload.rejected_by, payload.reason)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => lifecycle_error_response(e),
    }
}
