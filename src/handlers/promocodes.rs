use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::Method,
};
use serde_json::Value;

use super::{list as list_of, one, parse_json, remove, require_session, validate_object_id};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::normalize::Promocode;
use crate::upstream::UpstreamRequest;

/// GET /api/promocodes
pub async fn list(State(state): State<AppState>, auth: AuthContext, RawQuery(query): RawQuery) -> ApiResult<Vec<Promocode>> {
    require_session(&state, &auth)?;
    list_of(&state, &auth, "/api/promocodes", query).await
}

/// POST /api/promocodes
pub async fn create(State(state): State<AppState>, auth: AuthContext, body: Bytes) -> ApiResult<Promocode> {
    require_session(&state, &auth)?;
    let payload = parse_json(&body)?;
    let created = one(&state, &auth, UpstreamRequest::new(Method::POST, "/api/promocodes").json(payload)).await?;
    Ok(ApiResponse::created(created.data))
}

/// PATCH /api/promocodes/:id - edits and activate/deactivate toggles
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Promocode> {
    let id = validate_object_id(&id)?;
    require_session(&state, &auth)?;
    let payload = parse_json(&body)?;
    one(
        &state,
        &auth,
        UpstreamRequest::new(Method::PATCH, format!("/api/promocodes/{}", id)).json(payload),
    )
    .await
}

/// DELETE /api/promocodes/:id
pub async fn delete(State(state): State<AppState>, auth: AuthContext, Path(id): Path<String>) -> ApiResult<Value> {
    let id = validate_object_id(&id)?;
    require_session(&state, &auth)?;
    remove(&state, &auth, format!("/api/promocodes/{}", id), id).await
}
