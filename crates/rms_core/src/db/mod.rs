//! SQLite storage: connection bootstrap, schema migrations and transactions.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - No application table is touched before migrations succeed.
//! - A unit of work commits every statement or none of them.
//! - Read-only work takes no write lock until it reads.

use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, ping};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Parent directory of the database file could not be created.
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was migrated by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::CreateDirectory { path, source } => write!(
                f,
                "cannot create database directory `{}`: {source}",
                path.display()
            ),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "database schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::CreateDirectory { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Runs `work` inside one `IMMEDIATE` transaction.
///
/// Commits when `work` returns `Ok`. On `Err` the transaction is dropped,
/// which rolls back, and the error is returned unchanged. Begin and commit
/// failures surface as `E::from(rusqlite::Error)`.
pub fn run_in_transaction<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    run_with_behavior(conn, TransactionBehavior::Immediate, work)
}

/// Runs read-only `work` inside one `DEFERRED` transaction.
///
/// Every read sees one snapshot, but other connections may still write until
/// the first statement runs.
pub fn run_read_only<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    run_with_behavior(conn, TransactionBehavior::Deferred, work)
}

fn run_with_behavior<T, E, F>(
    conn: &mut Connection,
    behavior: TransactionBehavior,
    work: F,
) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
{
    let tx = conn.transaction_with_behavior(behavior)?;
    let outcome = work(&tx);
    if outcome.is_ok() {
        tx.commit()?;
        debug!("event=unit_of_work module=db status=commit");
    } else {
        drop(tx);
        warn!("event=unit_of_work module=db status=rollback");
    }
    outcome
}
