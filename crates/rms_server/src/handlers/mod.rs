//! Route handlers.
//!
//! Handlers only extract input, run one service call inside
//! `Database::unit_of_work` (writes) or `Database::read` (reads) and shape
//! the response. Extractor rejections are
//! taken as `Result` so they flow through `ApiError` like every other error.

pub mod content;
pub mod projects;
pub mod ratings;
pub mod status;

use rms_core::{Page, ProjectId};
use serde::Deserialize;

/// `?skip=&limit=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// `?project_id=&skip=&limit=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct FilteredPageParams {
    pub project_id: Option<ProjectId>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl FilteredPageParams {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}
