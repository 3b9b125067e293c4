use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method},
};

use super::{list as list_of, one, require_session, upstream_body, validate_id};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::ApiResult;
use crate::normalize::Booking;
use crate::upstream::UpstreamRequest;

/// GET /api/bookings - list bookings (query forwarded: page, limit, status, search)
pub async fn list(State(state): State<AppState>, auth: AuthContext, RawQuery(query): RawQuery) -> ApiResult<Vec<Booking>> {
    require_session(&state, &auth)?;
    list_of(&state, &auth, "/api/bookings", query).await
}

/// GET /api/bookings/:id
pub async fn get(State(state): State<AppState>, auth: AuthContext, Path(id): Path<String>) -> ApiResult<Booking> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    one(&state, &auth, UpstreamRequest::get(format!("/api/bookings/{}", id))).await
}

/// PATCH /api/bookings/:id - status changes, reassignment, rescheduling
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Booking> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    let body = upstream_body(&headers, body)?;
    one(
        &state,
        &auth,
        UpstreamRequest::new(Method::PATCH, format!("/api/bookings/{}", id)).body(body),
    )
    .await
}
