//! Content item and philosophical analysis models.
//!
//! # Invariants
//! - A content item belongs to exactly one project.
//! - A content item has zero or one analysis (`content_item_id` is unique).
//! - `content_data` is an open JSON object; only well-formedness is checked.

use crate::model::project::ProjectId;
use crate::model::rasa::Gender;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ContentItemId = i64;
pub type AnalysisId = i64;

/// Free-form metadata attached to a content item.
pub type Metadata = Map<String, Value>;

pub const CONTENT_TITLE_MAX_CHARS: usize = 255;
pub const CONTENT_TYPE_MAX_CHARS: usize = 50;
pub const CONTENT_URL_MAX_CHARS: usize = 512;
pub const PERSPECTIVE_MAX_CHARS: usize = 100;

/// Stored content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentItemId,
    pub project_id: ProjectId,
    pub title: String,
    /// Free-form tag such as `image`, `video` or `text`.
    pub content_type: Option<String>,
    /// URL or path to the asset.
    pub content_url: Option<String>,
    pub content_data: Option<Metadata>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller input for content item creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContentItem {
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub content_data: Option<Metadata>,
}

/// Stored philosophical analysis of one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhilosophicalAnalysis {
    pub id: AnalysisId,
    pub content_item_id: ContentItemId,
    pub gender_perspective: Option<Gender>,
    /// e.g. "North Indian", "South Indian".
    pub race_perspective: Option<String>,
    /// e.g. "Hindu", "Muslim".
    pub religious_perspective: Option<String>,
    pub analysis_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller input for creating or replacing an analysis.
///
/// The target content item comes from the request path, not the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub gender_perspective: Option<String>,
    #[serde(default)]
    pub race_perspective: Option<String>,
    #[serde(default)]
    pub religious_perspective: Option<String>,
    #[serde(default)]
    pub analysis_notes: Option<String>,
}
