//! Tally API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.
//!
//! Startup fails fast: if the store cannot be opened or migrated, the
//! process exits instead of serving without a backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use tally::api::{self, ApiError, Config};
use tally::db::{Database, DbError, SqliteDatabase};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(tally::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(tally::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "tally-api")]
#[command(author, version, about = "Transaction ledger API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "TALLY_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "TALLY_PORT", default_value = "3000")]
    port: u16,

    /// SQLite database file path
    #[arg(long, env = "TALLY_DB", default_value = "tally.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    println!("Opening database at {:?}", cli.db);
    let db = SqliteDatabase::open(&cli.db).await?;

    db.migrate().await?;
    println!("Database migrations complete");

    // Pass the abstract Database to the API layer
    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
    )
    .await?;

    Ok(())
}
