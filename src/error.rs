// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::config::ConfigError;
use crate::upstream::UpstreamError;

/// Error raised at the route-handler boundary, rendered as the JSON error envelope
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // Backend answered with a non-2xx status; mirrored to the caller
    Upstream { status: u16, message: String },

    // 502 Bad Gateway (backend answered 2xx with an unusable payload)
    BadGateway(String),

    // 500 Internal Server Error
    Configuration(String),
    Unreachable(String),
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Upstream { status, .. } => match StatusCode::from_u16(*status) {
                Ok(code) if code.is_client_error() || code.is_server_error() => *status,
                _ => 500,
            },
            ApiError::BadGateway(_) => 502,
            ApiError::Configuration(_) => 500,
            ApiError::Unreachable(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::BadGateway(msg) => msg,
            ApiError::Configuration(msg) => msg,
            ApiError::Unreachable(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::Configuration(_) => "CONFIGURATION_ERROR",
            ApiError::Unreachable(_) => "UPSTREAM_UNREACHABLE",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "ok": false,
            "success": false,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        ApiError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration(message.into())
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        ApiError::Unreachable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::configuration(err.to_string())
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Configuration(e) => e.into(),
            UpstreamError::Status { status, message, .. } => ApiError::upstream(status, message),
            UpstreamError::Timeout => {
                tracing::error!("Upstream request timed out");
                ApiError::unreachable("Upstream service did not respond in time")
            }
            UpstreamError::Unreachable(reason) => {
                // Log the transport detail but return a generic message
                tracing::error!("Upstream unreachable: {}", reason);
                ApiError::unreachable("Upstream service is unreachable")
            }
            UpstreamError::InvalidRequest(reason) => {
                tracing::error!("Could not build upstream request: {}", reason);
                ApiError::internal("Failed to build upstream request")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_mirrored() {
        let err = ApiError::upstream(503, "db down");
        assert_eq!(err.status_code(), 503);
        assert_eq!(
            err.to_json(),
            json!({ "ok": false, "success": false, "message": "db down", "code": "UPSTREAM_ERROR" })
        );
    }

    #[test]
    fn non_error_upstream_status_falls_back_to_500() {
        assert_eq!(ApiError::upstream(302, "moved").status_code(), 500);
        assert_eq!(ApiError::upstream(0, "none").status_code(), 500);
    }

    #[test]
    fn transport_failures_hide_detail() {
        let err: ApiError = UpstreamError::Unreachable("dns error: api.internal".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Upstream service is unreachable");
    }

    #[test]
    fn missing_base_maps_to_configuration_error() {
        let err: ApiError = UpstreamError::Configuration(ConfigError::MissingApiBase).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
