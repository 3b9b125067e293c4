// handlers/mod.rs - Route handlers, one module per resource family
//
// Every handler runs the same pipeline:
//   Received -> AuthExtracted -> UpstreamCalled -> Normalized -> Responded
// with path identifiers validated before anything is sent upstream.

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod customers;
pub mod earnings;
pub mod notifications;
pub mod promocodes;
pub mod providers;
pub mod system;

use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::normalize::{extract_pagination, slugify, Normalize};
use crate::upstream::{UpstreamBody, UpstreamRequest};

/// Gate for routes that need both a backend and a signed-in caller.
/// A missing backend base is reported before missing credentials.
pub(crate) fn require_session<'a>(state: &AppState, auth: &'a AuthContext) -> Result<&'a str, ApiError> {
    state.config.resolve_base()?;
    auth.require_token()
}

/// Send `request` upstream with the caller's credentials attached.
pub(crate) async fn forward(state: &AppState, auth: &AuthContext, request: UpstreamRequest) -> Result<Value, ApiError> {
    forward_with_cookies(state, auth, request, state.config.auth.forward_cookies).await
}

pub(crate) async fn forward_with_cookies(
    state: &AppState,
    auth: &AuthContext,
    request: UpstreamRequest,
    forward_cookies: bool,
) -> Result<Value, ApiError> {
    let method = request.method.clone();
    let path = request.path.clone();

    state
        .upstream
        .call(request.headers(auth.outbound_headers(forward_cookies)))
        .await
        .map_err(|e| {
            tracing::warn!(method = %method, path = %path, status = ?e.status(), "upstream error");
            ApiError::from(e)
        })
}

/// GET a collection and normalize it.
pub(crate) async fn list<T: Normalize>(
    state: &AppState,
    auth: &AuthContext,
    path: &str,
    query: Option<String>,
) -> ApiResult<Vec<T>> {
    let raw = forward(state, auth, UpstreamRequest::get(path).query(query)).await?;
    Ok(ApiResponse::success(T::normalize_list(&raw)).with_pagination(extract_pagination(&raw)))
}

/// Send a single-record request and normalize the answer.
pub(crate) async fn one<T: Normalize>(state: &AppState, auth: &AuthContext, request: UpstreamRequest) -> ApiResult<T> {
    let raw = forward(state, auth, request).await?;
    Ok(ApiResponse::success(T::normalize_one(&raw)))
}

/// DELETE a record; the answer body is not needed.
pub(crate) async fn remove(state: &AppState, auth: &AuthContext, path: String, id: &str) -> ApiResult<Value> {
    forward(state, auth, UpstreamRequest::new(axum::http::Method::DELETE, path)).await?;
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}

/// Reject empty, `undefined` and `null` identifiers and anything that would
/// change the upstream path.
pub fn validate_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() || id == "undefined" || id == "null" {
        return Err(ApiError::validation("A valid identifier is required"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) || id == "." || id == ".." {
        return Err(ApiError::validation(format!("Invalid identifier: {}", id)));
    }
    Ok(id)
}

/// 24 hexadecimal characters (backend object ids).
pub fn validate_object_id(id: &str) -> Result<&str, ApiError> {
    let id = validate_id(id)?;
    if id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(id)
    } else {
        Err(ApiError::validation(format!("Invalid identifier: {}", id)))
    }
}

/// Parse a request body that must be JSON.
pub fn parse_json(bytes: &Bytes) -> Result<Value, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::validation("Request body is required"));
    }
    serde_json::from_slice(bytes).map_err(|e| ApiError::invalid_json(format!("Invalid JSON body: {}", e)))
}

/// JSON bodies are validated; other payloads (multipart uploads) travel as-is
/// with their original content type.
pub fn upstream_body(headers: &HeaderMap, bytes: Bytes) -> Result<UpstreamBody, ApiError> {
    if bytes.is_empty() {
        return Ok(UpstreamBody::Empty);
    }

    let content_type = headers.get(header::CONTENT_TYPE);
    let is_json = content_type
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(true);

    if is_json {
        parse_json(&bytes).map(UpstreamBody::Json)
    } else {
        Ok(UpstreamBody::Raw {
            content_type: content_type.cloned(),
            bytes,
        })
    }
}

/// Fill in `slug` from `name` on JSON bodies that lack one.
pub fn with_derived_slug(body: UpstreamBody) -> UpstreamBody {
    match body {
        UpstreamBody::Json(Value::Object(mut map)) => {
            let has_slug = map
                .get("slug")
                .and_then(Value::as_str)
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false);
            if !has_slug {
                if let Some(name) = map.get("name").and_then(Value::as_str) {
                    let slug = slugify(name);
                    if !slug.is_empty() {
                        map.insert("slug".to_string(), Value::String(slug));
                    }
                }
            }
            UpstreamBody::Json(Value::Object(map))
        }
        other => other,
    }
}
