//! Content item and philosophical analysis persistence.
//!
//! # Responsibility
//! - Store content items under their project.
//! - Keep at most one analysis per content item (unique FK column).
//!
//! # Invariants
//! - Every content item row has a project (`project_id` is `NOT NULL`).
//! - `content_data` round-trips as a JSON object.
//! - Analysis updates refresh `updated_at`; `created_at` never changes.

use crate::model::content::{
    AnalysisId, ContentItem, ContentItemId, Metadata, PhilosophicalAnalysis,
};
use crate::model::project::ProjectId;
use crate::model::rasa::Gender;
use crate::repo::{ensure_connection_ready, Page, RepoError, RepoResult, NOW_MS_SQL};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CONTENT_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    title,
    content_type,
    content_url,
    content_data,
    created_at,
    updated_at
FROM content_items";

const ANALYSIS_SELECT_SQL: &str = "SELECT
    id,
    content_item_id,
    gender_perspective,
    race_perspective,
    religious_perspective,
    analysis_notes,
    created_at,
    updated_at
FROM philosophical_analyses";

/// Validated content item row ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItemInsert<'a> {
    pub project_id: ProjectId,
    pub title: &'a str,
    pub content_type: Option<&'a str>,
    pub content_url: Option<&'a str>,
    pub content_data: Option<&'a Metadata>,
}

/// Validated analysis fields for insert or in-place update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWrite<'a> {
    pub gender_perspective: Option<Gender>,
    pub race_perspective: Option<&'a str>,
    pub religious_perspective: Option<&'a str>,
    pub analysis_notes: Option<&'a str>,
}

/// Query options for listing content items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentListQuery {
    pub project_id: Option<ProjectId>,
    pub page: Page,
}

/// Repository interface for content items and their analyses.
pub trait ContentRepository {
    fn insert_content_item(&self, item: &ContentItemInsert<'_>) -> RepoResult<ContentItemId>;
    fn get_content_item(&self, id: ContentItemId) -> RepoResult<Option<ContentItem>>;
    fn list_content_items(&self, query: &ContentListQuery) -> RepoResult<Vec<ContentItem>>;
    fn get_analysis(&self, content_item_id: ContentItemId)
        -> RepoResult<Option<PhilosophicalAnalysis>>;
    fn insert_analysis(
        &self,
        content_item_id: ContentItemId,
        analysis: &AnalysisWrite<'_>,
    ) -> RepoResult<AnalysisId>;
    /// Replaces all analysis fields; `NotFound` when the item has none.
    fn update_analysis(
        &self,
        content_item_id: ContentItemId,
        analysis: &AnalysisWrite<'_>,
    ) -> RepoResult<()>;
}

/// SQLite-backed content repository.
pub struct SqliteContentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["content_items", "philosophical_analyses"])?;
        Ok(Self { conn })
    }
}

impl ContentRepository for SqliteContentRepository<'_> {
    fn insert_content_item(&self, item: &ContentItemInsert<'_>) -> RepoResult<ContentItemId> {
        let content_data = item
            .content_data
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| RepoError::InvalidData(format!("content_data: {err}")))?;

        self.conn.execute(
            "INSERT INTO content_items (
                project_id,
                title,
                content_type,
                content_url,
                content_data
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.project_id,
                item.title,
                item.content_type,
                item.content_url,
                content_data,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_content_item(&self, id: ContentItemId) -> RepoResult<Option<ContentItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_content_row(row)?));
        }
        Ok(None)
    }

    fn list_content_items(&self, query: &ContentListQuery) -> RepoResult<Vec<ContentItem>> {
        let mut sql = format!("{CONTENT_SELECT_SQL} WHERE 1 = 1");
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
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_content_row(row)?);
        }
        Ok(items)
    }

    fn get_analysis(
        &self,
        content_item_id: ContentItemId,
    ) -> RepoResult<Option<PhilosophicalAnalysis>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ANALYSIS_SELECT_SQL} WHERE content_item_id = ?1;"))?;
        let mut rows = stmt.query([content_item_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_analysis_row(row)?));
        }
        Ok(None)
    }

    fn insert_analysis(
        &self,
        content_item_id: ContentItemId,
        analysis: &AnalysisWrite<'_>,
    ) -> RepoResult<AnalysisId> {
        self.conn.execute(
            "INSERT INTO philosophical_analyses (
                content_item_id,
                gender_perspective,
                race_perspective,
                religious_perspective,
                analysis_notes
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                content_item_id,
                analysis.gender_perspective.map(Gender::as_str),
                analysis.race_perspective,
                analysis.religious_perspective,
                analysis.analysis_notes,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_analysis(
        &self,
        content_item_id: ContentItemId,
        analysis: &AnalysisWrite<'_>,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE philosophical_analyses
                 SET
                    gender_perspective = ?2,
                    race_perspective = ?3,
                    religious_perspective = ?4,
                    analysis_notes = ?5,
                    updated_at = MAX(updated_at, {NOW_MS_SQL})
                 WHERE content_item_id = ?1;"
            ),
            params![
                content_item_id,
                analysis.gender_perspective.map(Gender::as_str),
                analysis.race_perspective,
                analysis.religious_perspective,
                analysis.analysis_notes,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "philosophical_analysis",
                id: content_item_id,
            });
        }

        Ok(())
    }
}

fn parse_content_row(row: &Row<'_>) -> RepoResult<ContentItem> {
    let project_id: Option<ProjectId> = row.get("project_id")?;
    let id: ContentItemId = row.get("id")?;
    let project_id = project_id.ok_or_else(|| {
        RepoError::InvalidData(format!("content_items.project_id is NULL for item {id}"))
    })?;

    let content_data = match row.get::<_, Option<String>>("content_data")? {
        Some(raw) => Some(serde_json::from_str::<Metadata>(&raw).map_err(|err| {
            RepoError::InvalidData(format!("invalid JSON in content_items.content_data: {err}"))
        })?),
        None => None,
    };

    Ok(ContentItem {
        id,
        project_id,
        title: row.get("title")?,
        content_type: row.get("content_type")?,
        content_url: row.get("content_url")?,
        content_data,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_analysis_row(row: &Row<'_>) -> RepoResult<PhilosophicalAnalysis> {
    let gender_perspective = match row.get::<_, Option<String>>("gender_perspective")? {
        Some(value) => Some(Gender::from_db(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid gender `{value}` in philosophical_analyses.gender_perspective"
            ))
        })?),
        None => None,
    };

    Ok(PhilosophicalAnalysis {
        id: row.get("id")?,
        content_item_id: row.get("content_item_id")?,
        gender_perspective,
        race_perspective: row.get("race_perspective")?,
        religious_perspective: row.get("religious_perspective")?,
        analysis_notes: row.get("analysis_notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
