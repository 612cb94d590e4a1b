//! Project domain model.
//!
//! # Invariants
//! - `title` is non-blank and at most `PROJECT_TITLE_MAX_CHARS` characters.
//! - `expected_rasa` is always a member of the closed rasa set.
//! - `id`, `created_at` and `updated_at` are assigned by storage.

use crate::model::rasa::Rasa;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Storage-assigned project identifier.
pub type ProjectId = i64;

pub const PROJECT_TITLE_MAX_CHARS: usize = 255;

/// Stored project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: Option<UserId>,
    pub expected_rasa: Rasa,
    /// Reference URLs in submission order.
    pub reference_links: Option<Vec<String>>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Caller input for project creation.
///
/// `expected_rasa` stays a raw string here; it is resolved against the closed
/// set by the service so invalid names surface as enum errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `SHRINGARA` when omitted.
    #[serde(default)]
    pub expected_rasa: Option<String>,
    #[serde(default)]
    pub reference_links: Option<Vec<String>>,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Validated project row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInsert<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub expected_rasa: Rasa,
    pub reference_links: Option<&'a [String]>,
}
