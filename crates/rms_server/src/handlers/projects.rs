//! GET  /projects      list projects
//! POST /projects      create a project
//! GET  /projects/:id  fetch one project

use crate::error::ApiError;
use crate::handlers::PageParams;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rms_core::{NewProject, Project, ProjectId, ProjectService};

pub async fn list_projects(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let Query(params) = params?;
    let page = params.page();
    let projects = state
        .db
        .read(move |tx| ProjectService::sqlite(tx)?.list_projects(page))
        .await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(input) = body?;
    let project = state
        .db
        .unit_of_work(move |tx| ProjectService::sqlite(tx)?.create_project(&input))
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<AppState>,
    id: Result<Path<ProjectId>, PathRejection>,
) -> Result<Json<Project>, ApiError> {
    let Path(id) = id?;
    let project = state
        .db
        .read(move |tx| ProjectService::sqlite(tx)?.get_project(id))
        .await?;
    Ok(Json(project))
}
