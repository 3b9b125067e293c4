// Categories and services. Reads are anonymous (the public catalog),
// writes need a session. Creates may be JSON or multipart (image upload).

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method},
};
use serde_json::Value;

use super::{
    list as list_of, one, remove, require_session, upstream_body, validate_object_id, with_derived_slug,
};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::normalize::{Category, Service};
use crate::upstream::UpstreamRequest;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthContext,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Category>> {
    list_of(&state, &auth, "/api/categories", query).await
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthContext,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Category> {
    require_session(&state, &auth)?;
    let body = with_derived_slug(upstream_body(&headers, body)?);
    let created = one(&state, &auth, UpstreamRequest::new(Method::POST, "/api/categories").body(body)).await?;
    Ok(ApiResponse::created(created.data))
}

/// PATCH /api/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Category> {
    let id = validate_object_id(&id)?;
    require_session(&state, &auth)?;
    let body = upstream_body(&headers, body)?;
    one(
        &state,
        &auth,
        UpstreamRequest::new(Method::PATCH, format!("/api/categories/{}", id)).body(body),
    )
    .await
}

/// DELETE /api/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = validate_object_id(&id)?;
    require_session(&state, &auth)?;
    remove(&state, &auth, format!("/api/categories/{}", id), id).await
}

/// GET /api/services (query forwarded, e.g. `?category=<id>`)
pub async fn list_services(
    State(state): State<AppState>,
    auth: AuthContext,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<Service>> {
    list_of(&state, &auth, "/api/services", query).await
}

/// POST /api/services
pub async fn create_service(
    State(state): State<AppState>,
    auth: AuthContext,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Service> {
    require_session(&state, &auth)?;
    let body = with_derived_slug(upstream_body(&headers, body)?);
    let created = one(&state, &auth, UpstreamRequest::new(Method::POST, "/api/services").body(body)).await?;
    Ok(ApiResponse::created(created.data))
}

/// PATCH /api/services/:id
pub async fn update_service(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Service> {
    let id = validate_object_id(&id)?;
    require_session(&state, &auth)?;
    let body = upstream_body(&headers, body)?;
    one(
        &state,
        &auth,
        UpstreamRequest::new(Method::PATCH, format!("/api/services/{}", id)).body(body),
    )
    .await
}

/// DELETE /api/services/:id
pub async fn delete_service(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = validate_object_id(&id)?;
    require_session(&state, &auth)?;
    remove(&state, &auth, format!("/api/services/{}", id), id).await
}
