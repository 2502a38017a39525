//! Request handlers and shared wire helpers.

mod balance;
mod system;
mod transactions;

#[cfg(test)]
mod balance_test;
#[cfg(test)]
mod transactions_test;

pub use balance::*;
pub use system::*;
pub use transactions::*;

use axum::{Json, http::StatusCode};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::{DateRange, DbError};

/// Error payload returned by every failing endpoint.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Transaction not found: 'a1b2c3d4'")]
    pub error: String,
}

pub(crate) type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_reply(status: StatusCode, message: impl Into<String>) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map store errors onto the HTTP taxonomy: missing record is 404, rejected
/// input is 400, everything else is a 500.
pub(crate) fn db_error_reply(err: DbError) -> ErrorReply {
    let status = match err {
        DbError::NotFound { .. } => StatusCode::NOT_FOUND,
        DbError::InvalidId { .. } | DbError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_reply(status, err.to_string())
}

/// Reject malformed ids before any store interaction.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ErrorReply> {
    Uuid::parse_str(raw).map_err(|_| db_error_reply(DbError::InvalidId { id: raw.to_string() }))
}

/// Accept an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

/// Build an inclusive date window from optional query values, rejecting
/// unparsable dates with a 400. Empty values count as absent bounds.
pub(crate) fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange, ErrorReply> {
    let parse = |raw: &str| {
        parse_timestamp(raw).ok_or_else(|| {
            error_reply(
                StatusCode::BAD_REQUEST,
                format!("'{}' is not a valid date", raw),
            )
        })
    };
    let from = from.filter(|s| !s.is_empty()).map(parse).transpose()?;
    let to = to.filter(|s| !s.is_empty()).map(parse).transpose()?;
    Ok(DateRange::new(from, to))
}
