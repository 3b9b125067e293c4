use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method},
};

use super::{list as list_of, one, require_session, upstream_body, validate_id};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::ApiResult;
use crate::normalize::Provider;
use crate::upstream::UpstreamRequest;

/// GET /api/providers
pub async fn list(State(state): State<AppState>, auth: AuthContext, RawQuery(query): RawQuery) -> ApiResult<Vec<Provider>> {
    require_session(&state, &auth)?;
    list_of(&state, &auth, "/api/providers", query).await
}

/// GET /api/providers/:id
pub async fn get(State(state): State<AppState>, auth: AuthContext, Path(id): Path<String>) -> ApiResult<Provider> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    one(&state, &auth, UpstreamRequest::get(format!("/api/providers/{}", id))).await
}

/// PATCH /api/providers/:id - approve, suspend, verify
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Provider> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    let body = upstream_body(&headers, body)?;
    one(
        &state,
        &auth,
        UpstreamRequest::new(Method::PATCH, format!("/api/providers/{}", id)).body(body),
    )
    .await
}
