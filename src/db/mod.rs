//! Storage layer for transaction records.
//!
//! - `error`: backend-agnostic error types
//! - `models`: domain entities and validation
//! - `repository`: trait definitions for data access
//! - `sqlite`: sqlx/SQLite implementation

mod error;
mod models;
mod repository;
mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
