//! Store error types.
//!
//! Abstracted error types for store operations. Uses miette for diagnostic
//! output and thiserror for derive macros; the variants are backend-agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Store operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Transaction not found: '{id}'")]
    #[diagnostic(code(tally::db::not_found))]
    NotFound { id: String },

    #[error("Invalid transaction id: '{id}'")]
    #[diagnostic(code(tally::db::invalid_id))]
    InvalidId { id: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(tally::db::validation))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(tally::db::database))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(tally::db::connection))]
    Connection { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(tally::db::migration))]
    Migration { message: String },
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
