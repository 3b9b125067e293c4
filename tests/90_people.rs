mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::*;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn providers_list_flattens_nested_user() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/providers").query_param("status", "pending");
            then.status(200).header("content-type", "application/json").json_body(json!({
                "data": {
                    "providers": [{
                        "_id": "p1",
                        "user": {"name": "Kiran", "email": "kiran@example.com"},
                        "averageRating": "4.6",
                        "isVerified": true,
                        "approvalStatus": "PENDING"
                    }],
                    "pagination": {"page": 1, "pages": 3}
                }
            }));
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/providers?status=pending").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    let provider = &body["data"][0];
    assert_eq!(provider["name"], "Kiran");
    assert_eq!(provider["email"], "kiran@example.com");
    assert_eq!(provider["rating"], 4.6);
    assert_eq!(provider["verified"], true);
    assert_eq!(provider["status"], "pending");
    assert_eq!(body["pagination"]["pages"], 3);
    Ok(())
}

#[tokio::test]
async fn provider_approval_is_forwarded() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.method(PATCH).path("/api/providers/p1").json_body(json!({"status": "approved"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"provider": {"_id": "p1", "status": "APPROVED"}}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let request = TestRequest::new(Method::PATCH, "/api/providers/p1")
        .bearer("t")
        .json(json!({"status": "approved"}));
    let response = send(&app, request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["data"]["status"], "approved");
    upstream.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn customer_detail_builds_name_from_parts() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/customers/c1");
            then.status(200).header("content-type", "application/json").json_body(json!({
                "data": {"customer": {"_id": "c1", "firstName": "Meera", "lastName": "Rao", "bookingsCount": 5}}
            }));
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/customers/c1").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["data"]["name"], "Meera Rao");
    assert_eq!(body["data"]["totalBookings"], 5);
    Ok(())
}

#[tokio::test]
async fn configured_api_keys_travel_with_every_call() -> Result<()> {
    let backend = MockServer::start_async().await;
    let upstream = backend
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/customers")
                .header("x-admin-api-key", "admin-secret")
                .header("x-api-key", "service-secret");
            then.status(200).header("content-type", "application/json").json_body(json!([]));
        })
        .await;

    let mut config = config_for(&backend);
    config.auth.admin_api_key = Some("admin-secret".to_string());
    config.auth.api_key = Some("service-secret".to_string());
    let app = gateway(config)?;

    let response = send(&app, TestRequest::get("/api/customers").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
    Ok(())
}
