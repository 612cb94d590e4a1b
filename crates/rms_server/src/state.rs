//! Shared application state and the database handle.
//!
//! # Invariants
//! - One SQLite connection per process, owned by `Database`.
//! - The connection mutex is locked only inside blocking-pool closures, never
//!   across an `.await`.
//! - Each `unit_of_work` or `read` call is exactly one SQLite transaction.

use crate::config::DatabaseLocation;
use crate::error::ApiError;
use log::error;
use rms_core::{
    open_db, open_db_in_memory, run_in_transaction, run_read_only, DbResult, ServiceResult,
};
use rusqlite::{Connection, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-scoped database handle, cheap to clone into handlers.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (and migrates) the configured database.
    pub fn open(location: &DatabaseLocation) -> DbResult<Self> {
        let conn = match location {
            DatabaseLocation::File(path) => open_db(path)?,
            DatabaseLocation::Memory => open_db_in_memory()?,
        };
        Ok(Self::from_connection(conn))
    }

    pub fn in_memory() -> DbResult<Self> {
        Self::open(&DatabaseLocation::Memory)
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `work` in one write transaction on the blocking pool.
    ///
    /// Commits when `work` succeeds; rolls back on any error.
    pub async fn unit_of_work<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> ServiceResult<T> + Send + 'static,
    {
        self.on_blocking_pool(move |conn| run_in_transaction(conn, work)).await
    }

    /// Runs read-only `work` in one deferred transaction on the blocking pool.
    pub async fn read<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> ServiceResult<T> + Send + 'static,
    {
        self.on_blocking_pool(move |conn| run_read_only(conn, work)).await
    }

    async fn on_blocking_pool<T, F>(&self, job: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> ServiceResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let outcome = tokio::task::spawn_blocking(move || {
            let mut guard = lock(&conn);
            job(&mut *guard)
        })
        .await
        .map_err(|err| {
            error!("event=unit_of_work module=server status=error error_code=join_failed error={err}");
            ApiError::Internal(format!("blocking task failed: {err}"))
        })?;

        outcome.map_err(ApiError::from)
    }

    /// Returns whether the connection answers a trivial query.
    pub async fn ping(&self) -> bool {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || rms_core::db::ping(&lock(&conn)).is_ok())
            .await
            .unwrap_or(false)
    }
}

// A panic mid-transaction drops the `Transaction`, which rolls back, so the
// connection behind a poisoned lock is still consistent.
fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// State shared by all routes.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Versioned prefix the API routes are nested under, e.g. `/api/v1`.
    pub api_prefix: Arc<str>,
}

impl AppState {
    pub fn new(db: Database, api_prefix: &str) -> Self {
        Self {
            db,
            api_prefix: Arc::from(api_prefix),
        }
    }
}
