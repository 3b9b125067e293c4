use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::auth::has_session_cookie;
use crate::config::SecurityConfig;

const PUBLIC_PREFIXES: &[&str] = &["/signup", "/auth", "/forgot-password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Public,
    Protected,
    Other,
}

/// `prefix` matches itself and anything below it, never `prefix` + more letters.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn classify_path(path: &str, security: &SecurityConfig) -> PathClass {
    if matches_prefix(path, &security.login_path) || PUBLIC_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Public
    } else if security.protected_prefixes.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Protected
    } else {
        PathClass::Other
    }
}

/// `<login>?next=<original path>`
pub fn login_redirect_target(login_path: &str, original_path: &str) -> String {
    let next: String = url::form_urlencoded::byte_serialize(original_path.as_bytes()).collect();
    format!("{}?next={}", login_path, next)
}

/// Redirect dashboard pages to login when no session cookie is present.
/// Only presence is checked; the backend validates the token itself.
pub async fn access_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let security = &state.config.security;

    if classify_path(path, security) == PathClass::Protected
        && !has_session_cookie(request.headers(), &state.config.auth)
    {
        let target = login_redirect_target(&security.login_path, path);
        tracing::debug!(path = %path, "no session cookie, redirecting to login");
        return Redirect::temporary(&target).into_response();
    }

    next.run(request).await
}
