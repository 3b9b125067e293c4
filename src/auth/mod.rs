//! Per-request auth context: which credentials get forwarded upstream.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

use crate::config::AuthConfig;
use crate::error::ApiError;

/// Outbound credentials derived from one incoming request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Complete `Authorization` header value to send upstream
    pub authorization: Option<String>,
    /// Raw incoming `Cookie` header
    pub cookie_header: Option<String>,
    /// Extra trust headers (`x-admin-api-key`, named API key)
    pub api_keys: Vec<(String, String)>,
}

impl AuthContext {
    /// An incoming `Authorization` header wins verbatim; otherwise the first
    /// non-empty cookie in `config.cookie_names` becomes a bearer token.
    pub fn from_headers(headers: &HeaderMap, config: &AuthConfig) -> Self {
        let cookie_header = joined_cookie_header(headers);

        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| {
                let raw = cookie_header.as_deref()?;
                config
                    .cookie_names
                    .iter()
                    .find_map(|name| cookie_value(raw, name))
                    .map(|token| format!("Bearer {}", token))
            });

        let mut api_keys = Vec::new();
        if let Some(key) = &config.admin_api_key {
            api_keys.push(("x-admin-api-key".to_string(), key.clone()));
        }
        if let Some(key) = &config.api_key {
            api_keys.push((config.api_key_header.clone(), key.clone()));
        }

        Self {
            authorization,
            cookie_header,
            api_keys,
        }
    }

    pub fn has_token(&self) -> bool {
        self.authorization.is_some()
    }

    /// Reject with 401 when no usable credential was found.
    pub fn require_token(&self) -> Result<&str, ApiError> {
        self.authorization
            .as_deref()
            .ok_or_else(|| ApiError::unauthorized("Unauthorized: please sign in"))
    }

    /// Headers to attach to the upstream call.
    pub fn outbound_headers(&self, forward_cookies: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(value) = self.authorization.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
            headers.insert(header::AUTHORIZATION, value);
        }
        if forward_cookies {
            if let Some(value) = self.cookie_header.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
                headers.insert(header::COOKIE, value);
            }
        }
        for (name, value) in &self.api_keys {
            if let (Ok(n), Ok(v)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                headers.insert(n, v);
            }
        }

        headers
    }
}

// Secrets never reach logs through Debug
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |present: bool| if present { "<redacted>" } else { "<none>" };
        f.debug_struct("AuthContext")
            .field("authorization", &redact(self.authorization.is_some()))
            .field("cookie_header", &redact(self.cookie_header.is_some()))
            .field(
                "api_keys",
                &self.api_keys.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// HTTP/2 clients may split cookies over several headers.
fn joined_cookie_header(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Value of cookie `name` in a raw `Cookie` header, if present and non-empty.
pub fn cookie_value(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() != name {
            return None;
        }
        let value = value.trim().trim_matches('"');
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

/// True when any configured session cookie carries a value.
pub fn has_session_cookie(headers: &HeaderMap, config: &AuthConfig) -> bool {
    joined_cookie_header(headers)
        .map(|raw| config.cookie_names.iter().any(|name| cookie_value(&raw, name).is_some()))
        .unwrap_or(false)
}
