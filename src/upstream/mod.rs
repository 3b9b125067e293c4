//! HTTP client for the backend API.
//!
//! Every call bypasses caches, carries the caller's auth headers, and turns
//! non-2xx answers into [`UpstreamError::Status`]. Nothing is retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use serde_json::Value;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String, body: Value },

    #[error("upstream did not respond in time")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),
}

impl UpstreamError {
    /// HTTP status of the upstream answer; `None` when none was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Request body forwarded upstream
#[derive(Debug, Clone, Default)]
pub enum UpstreamBody {
    #[default]
    Empty,
    Json(Value),
    /// Opaque payload (multipart uploads) sent with its original content type
    Raw {
        content_type: Option<HeaderValue>,
        bytes: Bytes,
    },
}

#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    /// Path below the backend origin, starting with `/`
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: UpstreamBody,
}

impl UpstreamRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            headers: HeaderMap::new(),
            body: UpstreamBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: UpstreamBody) -> Self {
        self.body = body;
        self
    }

    pub fn json(self, value: Value) -> Self {
        self.body(UpstreamBody::Json(value))
    }
}

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: Arc<AppConfig>,
}

impl UpstreamClient {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .connect_timeout(Duration::from_secs(config.upstream.connect_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Full upstream URL for `path` (+ optional raw query string).
    pub fn url_for(&self, path: &str, query: Option<&str>) -> Result<String, UpstreamError> {
        let base = self.config.resolve_base()?;
        let path = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
        Ok(match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", base, path, q),
            _ => format!("{}{}", base, path),
        })
    }

    /// Issue one request and return the decoded body.
    pub async fn call(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        let url = self.url_for(&request.path, request.query.as_deref())?;

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers)
            .header(header::CACHE_CONTROL, "no-cache, no-store")
            .header(header::PRAGMA, "no-cache")
            .header(header::ACCEPT, "application/json");

        builder = match request.body {
            UpstreamBody::Empty => builder,
            UpstreamBody::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| UpstreamError::InvalidRequest(e.to_string()))?;
                builder.header(header::CONTENT_TYPE, "application/json").body(bytes)
            }
            UpstreamBody::Raw { content_type, bytes } => {
                let builder = match content_type {
                    Some(ct) => builder.header(header::CONTENT_TYPE, ct),
                    None => builder,
                };
                builder.body(bytes)
            }
        };

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, path = %request.path, "upstream request failed");
            classify_transport_error(&e)
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);

        let text = response.text().await.map_err(|e| classify_transport_error(&e))?;
        let body = decode_body(&text, is_json);

        tracing::info!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream call"
        );

        if status.is_success() {
            Ok(body)
        } else {
            let message = error_message(&body, status.as_u16());
            Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
                body,
            })
        }
    }
}

/// JSON bodies are parsed; anything else (or unparsable JSON) stays raw text.
pub fn decode_body(text: &str, is_json: bool) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    if is_json {
        if let Ok(value) = serde_json::from_str(text) {
            return value;
        }
    }
    Value::String(text.to_string())
}

/// Caller-facing message for a failed upstream answer.
pub fn error_message(body: &Value, status: u16) -> String {
    let from_fields = ["message", "error", "msg"].iter().find_map(|key| {
        match body.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            // Validation pipes answer `{ message: ["a", "b"] }`
            Some(Value::Array(items)) => {
                let joined = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            // `{ error: { message } }`
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    });
    if let Some(message) = from_fields {
        return message;
    }

    // Short plain-text bodies are safe to surface; HTML error pages are not
    if let Value::String(text) = body {
        let text = text.trim();
        if !text.is_empty() && text.len() <= 200 && !text.starts_with('<') {
            return text.to_string();
        }
    }

    format!("Upstream request failed with status {}", status)
}

fn classify_transport_error(err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_builder() {
        UpstreamError::InvalidRequest(err.to_string())
    } else {
        UpstreamError::Unreachable(err.to_string())
    }
}
