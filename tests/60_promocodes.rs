mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::*;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn success_promocodes_shape_is_normalized() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/promocodes");
            then.status(200).header("content-type", "application/json").json_body(json!({
                "success": true,
                "promocodes": [{
                    "_id": "pc1",
                    "code": "WELCOME50",
                    "discountType": "PERCENTAGE",
                    "discountValue": "50",
                    "maxUses": 100,
                    "usedCount": 3,
                    "isActive": true,
                    "expiresAt": "2025-01-01T00:00:00Z"
                }]
            }));
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/promocodes").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["ok"], true);
    let promo = &body["data"][0];
    assert_eq!(promo["id"], "pc1");
    assert_eq!(promo["code"], "WELCOME50");
    assert_eq!(promo["discountType"], "percentage");
    assert_eq!(promo["discountValue"], 50.0);
    assert_eq!(promo["usageLimit"], 100);
    assert_eq!(promo["active"], true);
    assert_eq!(promo["validUntil"], "2025-01-01T00:00:00Z");
    Ok(())
}

#[tokio::test]
async fn toggle_uses_object_id_and_json_body() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.method(PATCH)
                .path(format!("/api/promocodes/{}", OBJECT_ID))
                .json_body(json!({"isActive": false}));
            then.status(200).header("content-type", "application/json").json_body(json!({
                "promocode": {"_id": OBJECT_ID, "code": "WELCOME50", "isActive": false}
            }));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::PATCH, &format!("/api/promocodes/{}", OBJECT_ID))
        .bearer("t")
        .json(json!({"isActive": false}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["data"]["active"], false);
    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn create_without_body_is_rejected_locally() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.any_request();
            then.status(201);
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::new(Method::POST, "/api/promocodes").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(upstream.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn backend_validation_errors_keep_their_status() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/promocodes");
            then.status(422)
                .header("content-type", "application/json")
                .json_body(json!({"error": {"message": "Code already exists"}}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/promocodes")
        .bearer("t")
        .json(json!({"code": "WELCOME50"}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await?;
    assert_eq!(body["message"], "Code already exists");
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    Ok(())
}

#[tokio::test]
async fn validation_message_lists_are_joined() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/api/promocodes");
            then.status(409)
                .header("content-type", "application/json")
                .json_body(json!({"statusCode": 409, "message": ["code must be unique"]}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::POST, "/api/promocodes")
        .bearer("t")
        .json(json!({"code": "WELCOME50"}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await?;
    assert_eq!(body["message"], "code must be unique");
    Ok(())
}
