use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use std::convert::Infallible;

use crate::app::AppState;
use crate::auth::AuthContext;

/// Derive the outbound credentials for every handler that asks for them.
/// Never rejects; handlers call `require_token()` where a session is mandatory.
#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let context = AuthContext::from_headers(&parts.headers, &state.config.auth);
        tracing::debug!(
            path = %parts.uri.path(),
            has_token = context.has_token(),
            "auth context extracted"
        );
        Ok(context)
    }
}
