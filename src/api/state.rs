//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
///
/// Holds the single long-lived store handle. Generic over `D: Database` so
/// any backend can be injected; the handle is constructed in the binary and
/// passed down, never created here.
pub struct AppState<D: Database> {
    db: Arc<D>,
}

// Manual Clone impl - we only need the Arc to be cloneable, not D.
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState with the given database handle.
    pub fn new(db: D) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }
}
