//! Transaction CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::AppState;
use crate::db::{
    Database, DbError, DbResult, Transaction, TransactionDraft, TransactionFilter,
    TransactionRepository,
};

use super::{ErrorReply, ErrorResponse, db_error_reply, error_reply, parse_id, parse_range};

/// Unwrap the body extractor, surfacing malformed or structurally invalid
/// JSON as a 400 `{error}` like every other rejected input.
fn require_payload(
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<TransactionPayload, ErrorReply> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(error_reply(StatusCode::BAD_REQUEST, rejection.body_text())),
    }
}

// =============================================================================
// DTOs
// =============================================================================

/// Request body for create and full-replace update. Validated at the
/// boundary; nothing reaches the store before `into_draft` succeeds.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionPayload {
    /// Movement direction, `income` or `expense` (case-insensitive).
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,
    #[schema(example = "groceries")]
    pub category: String,
    #[schema(example = 42.5)]
    pub amount: f64,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[schema(example = "2024-03-01")]
    pub date: String,
    /// Optional free text, at most 200 characters. Omitting it on update
    /// resets the stored value to empty.
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionPayload {
    fn into_draft(self) -> DbResult<TransactionDraft> {
        let kind = self
            .kind
            .parse()
            .map_err(|message| DbError::Validation { message })?;
        let date = super::parse_timestamp(&self.date).ok_or_else(|| DbError::Validation {
            message: format!("'{}' is not a valid date", self.date),
        })?;
        TransactionDraft::new(kind, &self.category, self.amount, date, self.description.as_deref())
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,
    #[schema(example = "groceries")]
    pub category: String,
    #[schema(example = 42.5)]
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind.to_string(),
            category: tx.category,
            amount: tx.amount,
            date: tx.date,
            description: tx.description,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTransactionsQuery {
    /// Filter by direction (exact match, case-insensitive)
    #[serde(rename = "type")]
    #[param(example = "income")]
    pub kind: Option<String>,
    /// Filter by category (exact match)
    #[param(example = "groceries")]
    pub category: Option<String>,
    /// Inclusive lower bound on `date`
    #[serde(rename = "dateFrom")]
    #[param(example = "2024-03-01")]
    pub date_from: Option<String>,
    /// Inclusive upper bound on `date`, clamped to end-of-day
    #[serde(rename = "dateTo")]
    #[param(example = "2024-03-31")]
    pub date_to: Option<String>,
}

impl ListTransactionsQuery {
    // Empty query values (`?type=&category=`) mean "no filter", they are
    // not parse failures.
    fn into_filter(self) -> Result<TransactionFilter, ErrorReply> {
        let kind = self
            .kind
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .transpose()
            .map_err(|message: String| db_error_reply(DbError::Validation { message }))?;
        let range = parse_range(self.date_from.as_deref(), self.date_to.as_deref())?;
        Ok(TransactionFilter {
            kind,
            category: self.category.filter(|s| !s.is_empty()),
            range,
        })
    }
}

/// Acknowledgement for a successful delete
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = true)]
    pub ok: bool,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = TransactionPayload,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_transaction<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), ErrorReply> {
    let draft = require_payload(payload)?
        .into_draft()
        .map_err(db_error_reply)?;
    let created = state
        .db()
        .transactions()
        .insert(&draft)
        .await
        .map_err(db_error_reply)?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Matching transactions, newest date first", body = [TransactionResponse]),
        (status = 400, description = "Unparsable filter value", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_transactions<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<TransactionResponse>>, ErrorReply> {
    let filter = query.into_filter()?;
    let records = state
        .db()
        .transactions()
        .list(&filter)
        .await
        .map_err(db_error_reply)?;

    Ok(Json(
        records.into_iter().map(TransactionResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction found", body = TransactionResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_transaction<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, ErrorReply> {
    let id = parse_id(&id)?;
    let record = state
        .db()
        .transactions()
        .get(id)
        .await
        .map_err(db_error_reply)?;

    Ok(Json(TransactionResponse::from(record)))
}

#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "transactions",
    params(("id" = String, Path, description = "Transaction ID")),
    request_body = TransactionPayload,
    responses(
        (status = 200, description = "Transaction replaced", body = TransactionResponse),
        (status = 400, description = "Malformed id or validation failure", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_transaction<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ErrorReply> {
    let id = parse_id(&id)?;
    // Full replace: fields omitted from the body revert to their defaults,
    // nothing is merged from the prior record.
    let draft = require_payload(payload)?
        .into_draft()
        .map_err(db_error_reply)?;
    let updated = state
        .db()
        .transactions()
        .replace(id, &draft)
        .await
        .map_err(db_error_reply)?;

    Ok(Json(TransactionResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "transactions",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_transaction<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ErrorReply> {
    let id = parse_id(&id)?;
    state
        .db()
        .transactions()
        .delete(id)
        .await
        .map_err(db_error_reply)?;

    Ok(Json(DeleteResponse { ok: true }))
}
