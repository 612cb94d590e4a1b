//! Project repository contracts and SQLite implementation.
//!
//! # Invariants
//! - List order is `id ASC` (insertion order), stable across reads.
//! - `reference_links` is stored as a JSON array of strings.

use crate::model::project::{Project, ProjectId, ProjectInsert};
use crate::model::rasa::Rasa;
use crate::repo::{ensure_connection_ready, Page, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    creator_id,
    expected_rasa,
    reference_links,
    created_at,
    updated_at
FROM projects";

/// Repository interface for project persistence.
pub trait ProjectRepository {
    /// Inserts one project and returns its storage-assigned id.
    fn insert_project(&self, project: &ProjectInsert<'_>) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn project_exists(&self, id: ProjectId) -> RepoResult<bool>;
    fn list_projects(&self, page: Page) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["projects"])?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &ProjectInsert<'_>) -> RepoResult<ProjectId> {
        let reference_links = project
            .reference_links
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| RepoError::InvalidData(format!("reference_links: {err}")))?;

        self.conn.execute(
            "INSERT INTO projects (
                title,
                description,
                expected_rasa,
                reference_links
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                project.title,
                project.description,
                project.expected_rasa.as_str(),
                reference_links,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn project_exists(&self, id: ProjectId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM projects WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn list_projects(&self, page: Page) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![i64::from(page.limit), i64::from(page.skip)])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let rasa_text: String = row.get("expected_rasa")?;
    let expected_rasa = Rasa::from_db(&rasa_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid rasa `{rasa_text}` in projects.expected_rasa"
        ))
    })?;

    let reference_links = match row.get::<_, Option<String>>("reference_links")? {
        Some(raw) => Some(serde_json::from_str::<Vec<String>>(&raw).map_err(|err| {
            RepoError::InvalidData(format!("invalid JSON in projects.reference_links: {err}"))
        })?),
        None => None,
    };

    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        creator_id: row.get("creator_id")?,
        expected_rasa,
        reference_links,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
