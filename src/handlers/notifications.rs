use axum::{
    extract::{Path, RawQuery, State},
    http::Method,
};
use serde_json::{json, Value};

use super::{forward, list as list_of, remove, require_session, validate_id};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::normalize::{coerce_integer, Notification};
use crate::upstream::UpstreamRequest;

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthContext,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Notification>> {
    require_session(&state, &auth)?;
    list_of(&state, &auth, "/api/notifications", query).await
}

/// PATCH /api/notifications/:id/read
pub async fn mark_read(State(state): State<AppState>, auth: AuthContext, Path(id): Path<String>) -> ApiResult<Value> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    forward(
        &state,
        &auth,
        UpstreamRequest::new(Method::PATCH, format!("/api/notifications/{}/read", id)),
    )
    .await?;
    Ok(ApiResponse::success(json!({ "id": id, "read": true })))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(State(state): State<AppState>, auth: AuthContext) -> ApiResult<Value> {
    require_session(&state, &auth)?;
    let raw = forward(
        &state,
        &auth,
        UpstreamRequest::new(Method::POST, "/api/notifications/read-all"),
    )
    .await?;
    let updated = coerce_integer(&raw, &["updated", "modifiedCount", "data.modifiedCount", "count"]);
    Ok(ApiResponse::success(json!({ "updated": updated })))
}

/// DELETE /api/notifications/:id
pub async fn delete(State(state): State<AppState>, auth: AuthContext, Path(id): Path<String>) -> ApiResult<Value> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    remove(&state, &auth, format!("/api/notifications/{}", id), id).await
}
