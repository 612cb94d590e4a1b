//! Persistence contracts and their SQLite implementations.
//!
//! One repository trait per entity keeps SQL out of the services. Every
//! SQLite repository is built with `try_new`, which refuses connections that
//! were not opened through `db::open_db*`.
//!
//! # Invariants
//! - Writes are insert-then-read-back; callers get storage-assigned fields.
//! - Rows that violate a model invariant surface as `InvalidData`, never as
//!   silently defaulted values.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod content_repo;
pub mod project_repo;
pub mod rating_repo;
pub mod user_repo;

/// SQL expression yielding the current time in epoch milliseconds.
pub(crate) const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A row addressed by id does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Persisted data violates a model invariant.
    InvalidData(String),
    /// Connection schema is behind this build.
    UninitializedConnection { required: u32, found: u32 },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection { required, found } => write!(
                f,
                "connection is at schema version {found}, repositories require {required}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Offset/limit window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    /// Builds a window from optional caller input.
    ///
    /// - `limit = None` -> `DEFAULT_PAGE_LIMIT`.
    /// - `limit > MAX_PAGE_LIMIT` -> clamped.
    /// - `limit = Some(0)` is kept and yields an empty result.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Fails unless `conn` is fully migrated and holds every table in `tables`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let required = latest_version();
    let found = schema_version(conn)?;
    if found < required {
        return Err(RepoError::UninitializedConnection { required, found });
    }

    let mut probe =
        conn.prepare_cached("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for &table in tables {
        if !probe.exists([table])? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

pub(crate) fn int_to_bool(table_column: &str, value: i64) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {table_column}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

    #[test]
    fn page_applies_defaults_and_clamps() {
        assert_eq!(Page::default(), Page { skip: 0, limit: DEFAULT_PAGE_LIMIT });
        assert_eq!(Page::new(Some(5), Some(500)).limit, MAX_PAGE_LIMIT);
        assert_eq!(Page::new(None, Some(0)).limit, 0);
    }
}
