//! Core domain logic for the RMS rating management system.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{
    open_db, open_db_in_memory, run_in_transaction, run_read_only, DbError, DbResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::content::{
    AnalysisInput, ContentItem, ContentItemId, Metadata, NewContentItem, PhilosophicalAnalysis,
};
pub use model::project::{NewProject, Project, ProjectId};
pub use model::rasa::{Gender, InvalidEnumValue, Rasa};
pub use model::rating::{NewRating, Rating, RatingId};
pub use model::user::{User, UserId};
pub use model::validation::{validate_rating_value, ConstraintViolation};
pub use repo::content_repo::ContentListQuery;
pub use repo::rating_repo::RatingListQuery;
pub use repo::{Page, RepoError, RepoResult};
pub use service::content_service::{ContentService, SqliteContentService};
pub use service::project_service::ProjectService;
pub use service::rating_service::{RatingService, SqliteRatingService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
