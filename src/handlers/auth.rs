// handlers/auth.rs - Session routes
//
// These keep their own `{ success, user }` shape rather than the data
// envelope; the dashboard login page reads `user` directly.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use super::{forward, forward_with_cookies, parse_json, require_session};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::normalize::{coerce_opt_string, passthrough};
use crate::upstream::UpstreamRequest;

const SESSION_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// POST /api/auth/login - exchange credentials for a session cookie
pub async fn login(State(state): State<AppState>, auth: AuthContext, body: Bytes) -> Result<Response, ApiError> {
    let credentials = parse_json(&body)?;

    // A stale session must not ride along with a fresh login
    let anonymous = AuthContext {
        authorization: None,
        cookie_header: None,
        ..auth
    };
    let raw = forward(
        &state,
        &anonymous,
        UpstreamRequest::new(Method::POST, "/api/auth/login").json(credentials),
    )
    .await?;

    let token = coerce_opt_string(&raw, &["token", "accessToken", "data.token", "data.accessToken"])
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_gateway("Login response did not include a token"))?;
    let user = passthrough(&raw, &["user", "data.user", "admin", "data.admin"]).unwrap_or(Value::Null);

    let cookie = session_cookie(&state.config, &token)
        .ok_or_else(|| ApiError::bad_gateway("Login response contained an unusable token"))?;

    tracing::info!("admin session established");

    let mut response = Json(json!({ "ok": true, "success": true, "user": user })).into_response();
    response.headers_mut().append(header::SET_COOKIE, cookie);
    Ok(response)
}

/// POST /api/auth/logout - clear every session cookie; upstream logout is best-effort
pub async fn logout(State(state): State<AppState>, auth: AuthContext) -> Response {
    if auth.has_token() {
        let request = UpstreamRequest::new(Method::POST, "/api/auth/logout");
        if let Err(e) = forward_with_cookies(&state, &auth, request, true).await {
            tracing::warn!(status = e.status_code(), "upstream logout failed; clearing cookies anyway");
        }
    }

    let mut response = Json(json!({ "ok": true, "success": true })).into_response();
    for name in &state.config.auth.cookie_names {
        if let Some(cookie) = expired_cookie(&state.config, name) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    response
}

/// GET /api/auth/me - current admin profile
pub async fn me(State(state): State<AppState>, auth: AuthContext) -> Result<Json<Value>, ApiError> {
    require_session(&state, &auth)?;
    let raw = forward_with_cookies(&state, &auth, UpstreamRequest::get("/api/auth/me"), true).await?;
    let user = passthrough(&raw, &["user", "data.user", "data"]).unwrap_or(raw);
    Ok(Json(json!({ "ok": true, "success": true, "user": user })))
}

fn cookie_attributes(config: &AppConfig, max_age: u64) -> String {
    let mut attrs = format!("Path=/; HttpOnly; SameSite=Lax; Max-Age={}", max_age);
    if config.security.secure_cookies {
        attrs.push_str("; Secure");
    }
    attrs
}

/// Session cookie named after the highest-precedence configured cookie.
pub fn session_cookie(config: &AppConfig, token: &str) -> Option<HeaderValue> {
    let name = config.auth.cookie_names.first()?;
    HeaderValue::from_str(&format!("{}={}; {}", name, token, cookie_attributes(config, SESSION_MAX_AGE_SECS))).ok()
}

fn expired_cookie(config: &AppConfig, name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{}=; {}", name, cookie_attributes(config, 0))).ok()
}
