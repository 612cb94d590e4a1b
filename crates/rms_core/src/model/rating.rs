//! Rating domain model.
//!
//! # Invariants
//! - `rasa` is a member of the closed rasa set.
//! - `rating_value` lies in `[1, 10]` for every row written by core; storage
//!   itself does not enforce the bound.
//! - Ratings are immutable once written (no `updated_at`).

use crate::model::content::ContentItemId;
use crate::model::project::ProjectId;
use crate::model::rasa::Rasa;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

pub type RatingId = i64;

/// Stored rating record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub content_item_id: Option<ContentItemId>,
    pub rasa: Rasa,
    pub rating_value: Option<i64>,
    pub feedback: Option<String>,
    pub created_at: i64,
}

/// Caller input for rating creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    pub project_id: ProjectId,
    pub rasa: String,
    pub rating_value: i64,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub content_item_id: Option<ContentItemId>,
}

impl NewRating {
    pub fn new(project_id: ProjectId, rasa: impl Into<String>, rating_value: i64) -> Self {
        Self {
            project_id,
            rasa: rasa.into(),
            rating_value,
            feedback: None,
            user_id: None,
            content_item_id: None,
        }
    }
}

/// Validated rating row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingInsert<'a> {
    pub user_id: Option<UserId>,
    pub project_id: ProjectId,
    pub content_item_id: Option<ContentItemId>,
    pub rasa: Rasa,
    pub rating_value: i64,
    pub feedback: Option<&'a str>,
}
