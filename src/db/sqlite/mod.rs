//! SQLite implementation of the database traits.

mod connection;
mod transaction;


pub use connection::SqliteDatabase;
pub use transaction::SqliteTransactionRepository;
