#![allow(dead_code)]

use std::sync::Once;

use admin_gateway::{app, AppConfig, AppState};
use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use httpmock::MockServer;
use serde_json::Value;
use tower::ServiceExt;

static TRACING: Once = Once::new();

/// Opt-in test logs: `RUST_LOG=admin_gateway=debug cargo test`
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Development config pointed at `backend`.
pub fn config_for(backend: &MockServer) -> AppConfig {
    let mut config = AppConfig::development();
    config.upstream.api_base = Some(backend.base_url());
    config.upstream.timeout_secs = 5;
    config.server.enable_request_logging = false;
    config
}

pub fn gateway(config: AppConfig) -> Result<Router> {
    init_tracing();
    let state = AppState::new(config).context("failed to build app state")?;
    Ok(app(state))
}

pub fn gateway_for(backend: &MockServer) -> Result<Router> {
    gateway(config_for(backend))
}

pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Body,
}

impl TestRequest {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            headers: Vec::new(),
            body: Body::empty(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("authorization", &format!("Bearer {}", token))
    }

    pub fn json(mut self, value: Value) -> Self {
        self.headers.push(("content-type".to_string(), "application/json".to_string()));
        self.body = Body::from(value.to_string());
        self
    }

    pub fn raw_body(mut self, body: &'static str) -> Self {
        self.body = Body::from(body);
        self
    }
}

pub async fn send(app: &Router, request: TestRequest) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(request.method).uri(request.uri);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let request = builder.body(request.body)?;
    Ok(app.clone().oneshot(request).await?)
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    serde_json::from_slice(&bytes).context("response body is not JSON")
}

pub fn header_str<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

pub const OBJECT_ID: &str = "507f1f77bcf86cd799439011";
