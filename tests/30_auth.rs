mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::*;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn login_sets_http_only_session_cookie() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .header_missing("authorization")
                .json_body(json!({"email": "admin@example.com", "password": "secret"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "success": true,
                    "token": "tok-123",
                    "user": {"_id": "u1", "email": "admin@example.com", "role": "admin"}
                }));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/auth/login")
        // A stale session must not be forwarded with the login
        .header("cookie", "accessToken=stale")
        .json(json!({"email": "admin@example.com", "password": "secret"}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = header_str(&response, "set-cookie").unwrap_or_default().to_string();
    assert!(cookie.starts_with("accessToken=tok-123;"), "cookie: {cookie}");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=604800"));

    let body = body_json(response).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "admin@example.com");
    // The token itself is never echoed to the browser
    assert!(body.get("token").is_none());

    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn login_rejection_is_mirrored() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({"success": false, "message": "Invalid credentials"}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/auth/login").json(json!({"email": "x", "password": "y"}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(header_str(&response, "set-cookie").is_none());

    let body = body_json(response).await?;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Invalid credentials");
    Ok(())
}

#[tokio::test]
async fn login_without_token_is_a_bad_gateway() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"success": true}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/auth/login").json(json!({"email": "x", "password": "y"}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn login_rejects_malformed_json_locally() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/auth/login")
        .header("content-type", "application/json")
        .raw_body("{not json");
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["code"], "INVALID_JSON");
    assert_eq!(upstream.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn logout_clears_every_session_cookie() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/logout").header("authorization", "Bearer abc");
            then.status(500);
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/auth/logout").header("cookie", "accessToken=abc");
    let response = send(&app, request).await?;
    // Upstream failure does not block the local logout
    assert_eq!(response.status(), StatusCode::OK);

    let cleared: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();
    assert_eq!(cleared.len(), 3);
    for name in ["accessToken", "token", "cm_admin_token"] {
        assert!(
            cleared.iter().any(|c| c.starts_with(&format!("{}=;", name)) && c.contains("Max-Age=0")),
            "{name} not cleared: {cleared:?}"
        );
    }

    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn me_requires_a_session() -> Result<()> {
    let backend = MockServer::start_async().await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/auth/me")).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn me_forwards_cookie_and_bearer() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/auth/me")
                .header("authorization", "Bearer abc")
                .header("cookie", "token=abc");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"data": {"user": {"name": "Asha"}}}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/auth/me").header("cookie", "token=abc")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["user"]["name"], "Asha");
    upstream.assert_async().await;
    Ok(())
}
