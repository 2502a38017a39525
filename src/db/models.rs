//! Domain models for the transaction store.
//!
//! These models are storage-agnostic and carry the invariants the rest of
//! the crate relies on: a validated draft never reaches the store with a
//! non-positive amount, a too-short category, or an overlong description.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{DbError, DbResult};

/// Direction of a financial movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    /// Case-insensitive: `INCOME`, `Income` and `income` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(format!("type must be 'income' or 'expense', got '{}'", s)),
        }
    }
}

/// A single income or expense record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, store-ready fields for an insert or a full replace.
///
/// Construction is the single validation gate: handlers build a draft from
/// the request DTO before any store interaction happens.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        category: &str,
        amount: f64,
        date: DateTime<Utc>,
        description: Option<&str>,
    ) -> DbResult<Self> {
        let category = category.trim();
        if category.chars().count() < 2 {
            return Err(DbError::Validation {
                message: "category must be at least 2 characters".to_string(),
            });
        }

        if !amount.is_finite() || amount <= 0.0 {
            return Err(DbError::Validation {
                message: "amount must be greater than zero".to_string(),
            });
        }

        let description = description.unwrap_or("").trim();
        if description.chars().count() > 200 {
            return Err(DbError::Validation {
                message: "description must be at most 200 characters".to_string(),
            });
        }

        Ok(Self {
            kind,
            category: category.to_string(),
            amount,
            date,
            description: description.to_string(),
        })
    }
}

/// Inclusive date window. The upper bound is clamped to the end of its
/// calendar day (23:59:59.999) so a day-level `dateTo` captures the whole day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self {
            from,
            to: to.map(end_of_day),
        }
    }
}

/// Force a timestamp to 23:59:59.999 on its own calendar day.
pub fn end_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(ts)
}

/// Filters for listing transactions. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub range: DateRange,
}

/// Sum of amounts per kind over a date window. Missing groups stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceSummary {
    pub total_income: f64,
    pub total_expense: f64,
}

impl BalanceSummary {
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expense
    }
}
