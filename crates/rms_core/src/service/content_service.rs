//! Content item and philosophical analysis use cases.

use crate::model::content::{
    AnalysisInput, ContentItem, ContentItemId, NewContentItem, PhilosophicalAnalysis,
    CONTENT_TITLE_MAX_CHARS, CONTENT_TYPE_MAX_CHARS, CONTENT_URL_MAX_CHARS,
    PERSPECTIVE_MAX_CHARS,
};
use crate::model::rasa::Gender;
use crate::model::validation::{optional_text, require_text};
use crate::repo::content_repo::{
    AnalysisWrite, ContentItemInsert, ContentListQuery, ContentRepository,
    SqliteContentRepository,
};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::RepoResult;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use rusqlite::Connection;

pub struct ContentService<P: ProjectRepository, C: ContentRepository> {
    projects: P,
    contents: C,
}

pub type SqliteContentService<'conn> =
    ContentService<SqliteProjectRepository<'conn>, SqliteContentRepository<'conn>>;

impl<'conn> SqliteContentService<'conn> {
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteProjectRepository::try_new(conn)?,
            SqliteContentRepository::try_new(conn)?,
        ))
    }
}

impl<P: ProjectRepository, C: ContentRepository> ContentService<P, C> {
    pub fn new(projects: P, contents: C) -> Self {
        Self { projects, contents }
    }

    /// Persists a content item under an existing project.
    ///
    /// The project check runs before field validation.
    pub fn create_content_item(&self, input: &NewContentItem) -> ServiceResult<ContentItem> {
        if !self.projects.project_exists(input.project_id)? {
            return Err(ServiceError::not_found("Project", input.project_id));
        }

        let title = require_text("title", &input.title, CONTENT_TITLE_MAX_CHARS)?;
        let content_type = optional_text(
            "content_type",
            input.content_type.as_deref(),
            CONTENT_TYPE_MAX_CHARS,
        )?;
        let content_url = optional_text(
            "content_url",
            input.content_url.as_deref(),
            CONTENT_URL_MAX_CHARS,
        )?;

        let id = self.contents.insert_content_item(&ContentItemInsert {
            project_id: input.project_id,
            title,
            content_type,
            content_url,
            content_data: input.content_data.as_ref(),
        })?;

        let item = self
            .contents
            .get_content_item(id)?
            .ok_or(ServiceError::InconsistentState(
                "created content item not found in read-back",
            ))?;
        info!(
            "event=content_item_create module=service status=ok content_item_id={} project_id={}",
            item.id, item.project_id
        );
        Ok(item)
    }

    pub fn get_content_item(&self, id: ContentItemId) -> ServiceResult<ContentItem> {
        self.contents
            .get_content_item(id)?
            .ok_or_else(|| ServiceError::not_found("ContentItem", id))
    }

    pub fn list_content_items(&self, query: &ContentListQuery) -> ServiceResult<Vec<ContentItem>> {
        Ok(self.contents.list_content_items(query)?)
    }

    /// Creates the item's analysis, or replaces every field of the existing one.
    ///
    /// # Errors
    /// - `NotFound` when the content item does not exist.
    /// - `InvalidEnum` for an unknown gender name.
    /// - `Constraint` for over-long perspective strings.
    pub fn put_analysis(
        &self,
        content_item_id: ContentItemId,
        input: &AnalysisInput,
    ) -> ServiceResult<PhilosophicalAnalysis> {
        if self.contents.get_content_item(content_item_id)?.is_none() {
            return Err(ServiceError::not_found("ContentItem", content_item_id));
        }

        let gender_perspective = input
            .gender_perspective
            .as_deref()
            .map(Gender::parse)
            .transpose()?;
        let write = AnalysisWrite {
            gender_perspective,
            race_perspective: optional_text(
                "race_perspective",
                input.race_perspective.as_deref(),
                PERSPECTIVE_MAX_CHARS,
            )?,
            religious_perspective: optional_text(
                "religious_perspective",
                input.religious_perspective.as_deref(),
                PERSPECTIVE_MAX_CHARS,
            )?,
            analysis_notes: input.analysis_notes.as_deref(),
        };

        let status = if self.contents.get_analysis(content_item_id)?.is_some() {
            self.contents.update_analysis(content_item_id, &write)?;
            "updated"
        } else {
            self.contents.insert_analysis(content_item_id, &write)?;
            "created"
        };

        let analysis = self
            .contents
            .get_analysis(content_item_id)?
            .ok_or(ServiceError::InconsistentState(
                "written analysis not found in read-back",
            ))?;
        info!(
            "event=analysis_put module=service status={} content_item_id={}",
            status, content_item_id
        );
        Ok(analysis)
    }

    /// Gets the analysis attached to a content item.
    pub fn get_analysis(&self, content_item_id: ContentItemId) -> ServiceResult<PhilosophicalAnalysis> {
        if self.contents.get_content_item(content_item_id)?.is_none() {
            return Err(ServiceError::not_found("ContentItem", content_item_id));
        }
        self.contents
            .get_analysis(content_item_id)?
            .ok_or(ServiceError::AnalysisNotFound(content_item_id))
    }
}
