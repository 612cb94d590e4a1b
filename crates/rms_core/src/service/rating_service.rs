//! Rating use-case service.
//!
//! # Invariants
//! - `create_rating` checks, in this order: project exists, content item
//!   exists and belongs to the project, user exists, rasa name is valid,
//!   rating value is in `[1, 10]`. A missing project therefore always wins
//!   over every other input problem.
//! - Nothing is written unless every check passes.

use crate::model::rasa::Rasa;
use crate::model::rating::{NewRating, Rating, RatingInsert};
use crate::model::validation::{validate_rating_value, ConstraintViolation};
use crate::repo::content_repo::{ContentRepository, SqliteContentRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::rating_repo::{RatingListQuery, RatingRepository, SqliteRatingRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoResult;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use rusqlite::Connection;

/// Use-case service for ratings and their referential checks.
pub struct RatingService<P, C, U, R>
where
    P: ProjectRepository,
    C: ContentRepository,
    U: UserRepository,
    R: RatingRepository,
{
    projects: P,
    contents: C,
    users: U,
    ratings: R,
}

/// `RatingService` wired to SQLite repositories sharing one connection.
pub type SqliteRatingService<'conn> = RatingService<
    SqliteProjectRepository<'conn>,
    SqliteContentRepository<'conn>,
    SqliteUserRepository<'conn>,
    SqliteRatingRepository<'conn>,
>;

impl<'conn> SqliteRatingService<'conn> {
    /// Builds the service over one connection or open transaction.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteProjectRepository::try_new(conn)?,
            SqliteContentRepository::try_new(conn)?,
            SqliteUserRepository::try_new(conn)?,
            SqliteRatingRepository::try_new(conn)?,
        ))
    }
}

impl<P, C, U, R> RatingService<P, C, U, R>
where
    P: ProjectRepository,
    C: ContentRepository,
    U: UserRepository,
    R: RatingRepository,
{
    pub fn new(projects: P, contents: C, users: U, ratings: R) -> Self {
        Self {
            projects,
            contents,
            users,
            ratings,
        }
    }

    /// Validates references and values, then persists one rating.
    ///
    /// # Errors
    /// - `NotFound` for a missing project, content item or user.
    /// - `Constraint` when the content item belongs to another project or the
    ///   rating value is out of range.
    /// - `InvalidEnum` for an unknown rasa name.
    pub fn create_rating(&self, input: &NewRating) -> ServiceResult<Rating> {
        if !self.projects.project_exists(input.project_id)? {
            return Err(ServiceError::not_found("Project", input.project_id));
        }

        if let Some(content_item_id) = input.content_item_id {
            let item = self
                .contents
                .get_content_item(content_item_id)?
                .ok_or_else(|| ServiceError::not_found("ContentItem", content_item_id))?;
            if item.project_id != input.project_id {
                return Err(ConstraintViolation::new(
                    "content_item_id",
                    format!(
                        "content item {content_item_id} belongs to project {}, not {}",
                        item.project_id, input.project_id
                    ),
                )
                .into());
            }
        }

        if let Some(user_id) = input.user_id {
            if self.users.get_user(user_id)?.is_none() {
                return Err(ServiceError::not_found("User", user_id));
            }
        }

        let rasa = Rasa::parse(&input.rasa)?;
        let rating_value = validate_rating_value(input.rating_value)?;

        let id = self.ratings.insert_rating(&RatingInsert {
            user_id: input.user_id,
            project_id: input.project_id,
            content_item_id: input.content_item_id,
            rasa,
            rating_value,
            feedback: input.feedback.as_deref(),
        })?;

        let rating = self
            .ratings
            .get_rating(id)?
            .ok_or(ServiceError::InconsistentState(
                "created rating not found in read-back",
            ))?;
        info!(
            "event=rating_create module=service status=ok rating_id={} project_id={} rasa={}",
            rating.id, input.project_id, rating.rasa
        );
        Ok(rating)
    }

    /// Lists ratings in insertion order, optionally for one project.
    pub fn list_ratings(&self, query: &RatingListQuery) -> ServiceResult<Vec<Rating>> {
        Ok(self.ratings.list_ratings(query)?)
    }
}
