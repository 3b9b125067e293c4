use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "ok": true,
        "success": true,
        "data": {
            "name": "Admin Gateway",
            "version": version,
            "description": "Backend-for-frontend gateway for the booking admin dashboard",
            "endpoints": {
                "auth": "/api/auth/login, /api/auth/logout, /api/auth/me",
                "bookings": "/api/bookings[/:id]",
                "categories": "/api/categories[/:id]",
                "services": "/api/services[/:id]",
                "providers": "/api/providers[/:id]",
                "promocodes": "/api/promocodes[/:id]",
                "notifications": "/api/notifications[/:id[/read]], /api/notifications/read-all",
                "customers": "/api/customers[/:id]",
                "earnings": "/api/earnings",
                "health": "/health"
            }
        }
    }))
}

/// GET /health - liveness plus whether a backend origin is configured.
/// Does not contact the backend.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.config.resolve_base() {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "upstream": "configured"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "ok": false,
                "success": false,
                "message": e.to_string(),
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "upstream": "missing"
                }
            })),
        ),
    }
}

/// Unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
