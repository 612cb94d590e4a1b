//! Rating repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Ratings are append-only.
//! - List order is `id ASC` (insertion order), optionally filtered by project.

use crate::model::project::ProjectId;
use crate::model::rasa::Rasa;
use crate::model::rating::{Rating, RatingId, RatingInsert};
use crate::repo::{ensure_connection_ready, Page, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const RATING_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    project_id,
    content_item_id,
    rasa,
    rating_value,
    feedback,
    created_at
FROM ratings";

/// Query options for listing ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingListQuery {
    /// `None` lists ratings of every project.
    pub project_id: Option<ProjectId>,
    pub page: Page,
}

/// Repository interface for rating persistence.
pub trait RatingRepository {
    fn insert_rating(&self, rating: &RatingInsert<'_>) -> RepoResult<RatingId>;
    fn get_rating(&self, id: RatingId) -> RepoResult<Option<Rating>>;
    fn list_ratings(&self, query: &RatingListQuery) -> RepoResult<Vec<Rating>>;
}

/// SQLite-backed rating repository.
pub struct SqliteRatingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRatingRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["ratings"])?;
        Ok(Self { conn })
    }
}

impl RatingRepository for SqliteRatingRepository<'_> {
    fn insert_rating(&self, rating: &RatingInsert<'_>) -> RepoResult<RatingId> {
        self.conn.execute(
            "INSERT INTO ratings (
                user_id,
                project_id,
                content_item_id,
                rasa,
                rating_value,
                feedback
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                rating.user_id,
                rating.project_id,
                rating.content_item_id,
                rating.rasa.as_str(),
                rating.rating_value,
                rating.feedback,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_rating(&self, id: RatingId) -> RepoResult<Option<Rating>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RATING_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_rating_row(row)?));
        }
        Ok(None)
    }

    fn list_ratings(&self, query: &RatingListQuery) -> RepoResult<Vec<Rating>> {
        let mut sql = format!("{RATING_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(project_id) = query.project_id {
            sql.push_str(" AND project_id = ?");
            bind_values.push(Value::Integer(project_id));
        }

        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");
        bind_values.push(Value::Integer(i64::from(query.page.limit)));
        bind_values.push(Value::Integer(i64::from(query.page.skip)));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut ratings = Vec::new();
        while let Some(row) = rows.next()? {
            ratings.push(parse_rating_row(row)?);
        }
        Ok(ratings)
    }
}

fn parse_rating_row(row: &Row<'_>) -> RepoResult<Rating> {
    let rasa_text: String = row.get("rasa")?;
    let rasa = Rasa::from_db(&rasa_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid rasa `{rasa_text}` in ratings.rasa"))
    })?;

    Ok(Rating {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        project_id: row.get("project_id")?,
        content_item_id: row.get("content_item_id")?,
        rasa,
        rating_value: row.get("rating_value")?,
        feedback: row.get("feedback")?,
        created_at: row.get("created_at")?,
    })
}
