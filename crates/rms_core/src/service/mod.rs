//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, existence checks and repository writes into
//!   use-case level APIs.
//! - Report failures as typed `ServiceError`s; HTTP concerns live in callers.
//!
//! # Invariants
//! - Services never open or commit transactions. Callers wrap each use case in
//!   `db::run_in_transaction` so a failure at any step leaves no rows behind.
//! - Every create returns the record as read back from storage.

use crate::db::DbError;
use crate::model::content::ContentItemId;
use crate::model::rasa::InvalidEnumValue;
use crate::model::validation::ConstraintViolation;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod content_service;
pub mod project_service;
pub mod rating_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error taxonomy shared by all use cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller supplied a name outside a closed enumeration.
    InvalidEnum(InvalidEnumValue),
    /// Caller supplied a value outside a declared bound.
    Constraint(ConstraintViolation),
    /// A referenced entity does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// The content item exists but has no analysis yet.
    AnalysisNotFound(ContentItemId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Whether the failure is caused by caller input rather than the system.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repo(_) | Self::InconsistentState(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEnum(err) => write!(f, "{err}"),
            Self::Constraint(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} with id {id} not found"),
            Self::AnalysisNotFound(content_item_id) => write!(
                f,
                "Philosophical analysis for content item {content_item_id} not found"
            ),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEnum(err) => Some(err),
            Self::Constraint(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidEnumValue> for ServiceError {
    fn from(value: InvalidEnumValue) -> Self {
        Self::InvalidEnum(value)
    }
}

impl From<ConstraintViolation> for ServiceError {
    fn from(value: ConstraintViolation) -> Self {
        Self::Constraint(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}
