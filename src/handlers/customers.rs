use axum::extract::{Path, RawQuery, State};

use super::{list as list_of, one, require_session, validate_id};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::ApiResult;
use crate::normalize::CustomerSummary;
use crate::upstream::UpstreamRequest;

/// GET /api/customers
pub async fn list(
    State(state): State<AppState>,
    auth: AuthContext,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<CustomerSummary>> {
    require_session(&state, &auth)?;
    list_of(&state, &auth, "/api/customers", query).await
}

/// GET /api/customers/:id
pub async fn get(State(state): State<AppState>, auth: AuthContext, Path(id): Path<String>) -> ApiResult<CustomerSummary> {
    let id = validate_id(&id)?;
    require_session(&state, &auth)?;
    one(&state, &auth, UpstreamRequest::get(format!("/api/customers/{}", id))).await
}
