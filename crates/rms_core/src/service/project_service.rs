//! Project use-case service.
//!
//! # Invariants
//! - Title is validated before the rasa name.
//! - An omitted `expected_rasa` resolves to `Rasa::Shringara`.

use crate::model::project::{NewProject, Project, ProjectId, ProjectInsert, PROJECT_TITLE_MAX_CHARS};
use crate::model::rasa::Rasa;
use crate::model::validation::require_text;
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::{Page, RepoResult};
use crate::service::{ServiceError, ServiceResult};
use log::info;
use rusqlite::Connection;

/// Use-case service wrapper for project operations.
pub struct ProjectService<P: ProjectRepository> {
    projects: P,
}

impl<'conn> ProjectService<SqliteProjectRepository<'conn>> {
    /// Builds the service over one connection or open transaction.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(SqliteProjectRepository::try_new(conn)?))
    }
}

impl<P: ProjectRepository> ProjectService<P> {
    pub fn new(projects: P) -> Self {
        Self { projects }
    }

    /// Validates and persists a project, returning the stored record.
    ///
    /// # Errors
    /// - `Constraint` for a blank or over-long title.
    /// - `InvalidEnum` for an unknown `expected_rasa`.
    pub fn create_project(&self, input: &NewProject) -> ServiceResult<Project> {
        let title = require_text("title", &input.title, PROJECT_TITLE_MAX_CHARS)?;
        let expected_rasa = match input.expected_rasa.as_deref() {
            Some(name) => Rasa::parse(name)?,
            None => Rasa::default(),
        };

        let id = self.projects.insert_project(&ProjectInsert {
            title,
            description: input.description.as_deref(),
            expected_rasa,
            reference_links: input.reference_links.as_deref(),
        })?;

        let project = self
            .projects
            .get_project(id)?
            .ok_or(ServiceError::InconsistentState(
                "created project not found in read-back",
            ))?;
        info!(
            "event=project_create module=service status=ok project_id={} rasa={}",
            project.id, project.expected_rasa
        );
        Ok(project)
    }

    /// Gets one project by id.
    pub fn get_project(&self, id: ProjectId) -> ServiceResult<Project> {
        self.projects
            .get_project(id)?
            .ok_or_else(|| ServiceError::not_found("Project", id))
    }

    /// Lists projects in insertion order.
    pub fn list_projects(&self, page: Page) -> ServiceResult<Vec<Project>> {
        Ok(self.projects.list_projects(page)?)
    }
}
