use axum::extract::{RawQuery, State};
use serde::Serialize;

use super::{forward, require_session};
use crate::app::AppState;
use crate::auth::AuthContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::normalize::{extract_pagination, EarningTransaction, EarningsSummary, Normalize};
use crate::upstream::UpstreamRequest;

#[derive(Debug, Serialize)]
pub struct EarningsView {
    pub summary: EarningsSummary,
    pub transactions: Vec<EarningTransaction>,
}

/// GET /api/earnings - summary and transactions fetched concurrently.
/// Either call failing fails the whole request.
pub async fn get(State(state): State<AppState>, auth: AuthContext, RawQuery(query): RawQuery) -> ApiResult<EarningsView> {
    require_session(&state, &auth)?;

    let summary = forward(
        &state,
        &auth,
        UpstreamRequest::get("/api/earnings/summary").query(query.clone()),
    );
    let transactions = forward(
        &state,
        &auth,
        UpstreamRequest::get("/api/earnings/transactions").query(query),
    );
    let (summary_raw, transactions_raw) = futures::try_join!(summary, transactions)?;

    let view = EarningsView {
        summary: EarningsSummary::normalize_one(&summary_raw),
        transactions: EarningTransaction::normalize_list(&transactions_raw),
    };
    Ok(ApiResponse::success(view).with_pagination(extract_pagination(&transactions_raw)))
}
