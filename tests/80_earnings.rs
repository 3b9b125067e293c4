mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::*;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn summary_and_transactions_are_combined() -> Result<()> {
    let backend = MockServer::start_async().await;
    let summary = backend
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/earnings/summary")
                .query_param("from", "2024-05-01")
                .header("authorization", "Bearer t");
            then.status(200).header("content-type", "application/json").json_body(json!({
                "data": {"summary": {"totalEarnings": 10000, "platformCommission": "1500", "totalBookings": 12}}
            }));
        })
        .await;
    let transactions = backend
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/earnings/transactions")
                .query_param("from", "2024-05-01")
                .header("authorization", "Bearer t");
            then.status(200).header("content-type", "application/json").json_body(json!({
                "transactions": [{"_id": "t1", "booking": {"_id": "b1"}, "amount": 999, "status": "PAID"}],
                "pagination": {"page": 1, "total": 1}
            }));
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/earnings?from=2024-05-01").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["data"]["summary"]["totalEarnings"], 10000.0);
    assert_eq!(body["data"]["summary"]["platformCommission"], 1500.0);
    assert_eq!(body["data"]["summary"]["bookingCount"], 12);
    assert_eq!(body["data"]["transactions"][0]["bookingId"], "b1");
    assert_eq!(body["data"]["transactions"][0]["status"], "paid");
    assert_eq!(body["pagination"]["total"], 1);

    summary.assert_async().await;
    transactions.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn one_failing_call_fails_the_request() -> Result<()> {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/earnings/summary");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"totalEarnings": 1}));
        })
        .await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/api/earnings/transactions");
            then.status(500)
                .header("content-type", "application/json")
                .json_body(json!({"message": "ledger offline"}));
        })
        .await;
    let app = gateway_for(&backend)?;

    let response = send(&app, TestRequest::get("/api/earnings").bearer("t")).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await?;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "ledger offline");
    assert!(body.get("data").is_none());
    Ok(())
}
