//! Balance summary handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::{Database, TransactionRepository};

use super::{ErrorReply, ErrorResponse, db_error_reply, parse_range};

#[derive(Debug, Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Inclusive lower bound on `date`
    #[serde(rename = "dateFrom")]
    #[param(example = "2024-01-01")]
    pub date_from: Option<String>,
    /// Inclusive upper bound on `date`, clamped to end-of-day
    #[serde(rename = "dateTo")]
    #[param(example = "2024-12-31")]
    pub date_to: Option<String>,
}

/// Sums per direction over the window, missing groups default to 0
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    #[schema(example = 100.0)]
    pub total_income: f64,
    #[schema(example = 40.0)]
    pub total_expense: f64,
    #[schema(example = 60.0)]
    pub balance: f64,
}

#[utoipa::path(
    get,
    path = "/balance",
    tag = "balance",
    params(BalanceQuery),
    responses(
        (status = 200, description = "Balance over the window", body = BalanceResponse),
        (status = 400, description = "Unparsable date", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn balance_summary<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceResponse>, ErrorReply> {
    let range = parse_range(query.date_from.as_deref(), query.date_to.as_deref())?;
    let summary = state
        .db()
        .transactions()
        .balance(&range)
        .await
        .map_err(db_error_reply)?;

    Ok(Json(BalanceResponse {
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        balance: summary.balance(),
    }))
}
