//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the HTTP layer.
//!
//! Methods are declared in return-position impl-trait form with a `Send`
//! bound so futures stay `Send` in handlers generic over `Database`.

use std::future::Future;

use uuid::Uuid;

use crate::db::{
    DbResult,
    models::{BalanceSummary, DateRange, Transaction, TransactionDraft, TransactionFilter},
};

/// Repository for Transaction operations.
pub trait TransactionRepository {
    /// Insert a new transaction, returning the stored record with its
    /// generated id and timestamps.
    fn insert(
        &self,
        draft: &TransactionDraft,
    ) -> impl Future<Output = DbResult<Transaction>> + Send;

    /// Fetch a transaction by id.
    fn get(&self, id: Uuid) -> impl Future<Output = DbResult<Transaction>> + Send;

    /// List transactions matching the filter, newest date first, ties broken
    /// by creation time (newest first).
    fn list(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = DbResult<Vec<Transaction>>> + Send;

    /// Replace every mutable field of an existing transaction. The creation
    /// timestamp is preserved, the update timestamp refreshed.
    fn replace(
        &self,
        id: Uuid,
        draft: &TransactionDraft,
    ) -> impl Future<Output = DbResult<Transaction>> + Send;

    /// Delete a transaction by id.
    fn delete(&self, id: Uuid) -> impl Future<Output = DbResult<()>> + Send;

    /// Sum amounts per kind over the given window.
    fn balance(&self, range: &DateRange) -> impl Future<Output = DbResult<BalanceSummary>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    // Send + Sync here keeps handler futures Send when the repository
    // temporary is held across an await.
    type Transactions<'a>: TransactionRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the transaction repository.
    fn transactions(&self) -> Self::Transactions<'_>;

    /// Drain and close the underlying connections.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
