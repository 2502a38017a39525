//! SQLite database connection and migration management.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::transaction::SqliteTransactionRepository;
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation backed by a connection pool.
///
/// The pool is safe for concurrent use by many simultaneous requests and is
/// the only long-lived handle the process holds.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if missing) a database at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        // A single connection keeps the in-memory schema alive across
        // pool checkouts.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }
}

impl Database for SqliteDatabase {
    type Transactions<'a> = SqliteTransactionRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn transactions(&self) -> SqliteTransactionRepository<'_> {
        SqliteTransactionRepository { pool: &self.pool }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
