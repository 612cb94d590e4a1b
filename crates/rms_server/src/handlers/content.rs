//! GET  /content-items               list content items, optionally for one project
//! POST /content-items               create a content item
//! GET  /content-items/:id           fetch one content item
//! GET  /content-items/:id/analysis  fetch the item's philosophical analysis
//! PUT  /content-items/:id/analysis  create or replace that analysis

use crate::error::ApiError;
use crate::handlers::FilteredPageParams;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rms_core::{
    AnalysisInput, ContentItem, ContentItemId, ContentListQuery, NewContentItem,
    PhilosophicalAnalysis, SqliteContentService,
};

pub async fn list_content_items(
    State(state): State<AppState>,
    params: Result<Query<FilteredPageParams>, QueryRejection>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    let Query(params) = params?;
    let query = ContentListQuery {
        project_id: params.project_id,
        page: params.page(),
    };
    let items = state
        .db
        .read(move |tx| SqliteContentService::sqlite(tx)?.list_content_items(&query))
        .await?;
    Ok(Json(items))
}

pub async fn create_content_item(
    State(state): State<AppState>,
    body: Result<Json<NewContentItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ContentItem>), ApiError> {
    let Json(input) = body?;
    let item = state
        .db
        .unit_of_work(move |tx| SqliteContentService::sqlite(tx)?.create_content_item(&input))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_content_item(
    State(state): State<AppState>,
    id: Result<Path<ContentItemId>, PathRejection>,
) -> Result<Json<ContentItem>, ApiError> {
    let Path(id) = id?;
    let item = state
        .db
        .read(move |tx| SqliteContentService::sqlite(tx)?.get_content_item(id))
        .await?;
    Ok(Json(item))
}

pub async fn get_analysis(
    State(state): State<AppState>,
    id: Result<Path<ContentItemId>, PathRejection>,
) -> Result<Json<PhilosophicalAnalysis>, ApiError> {
    let Path(id) = id?;
    let analysis = state
        .db
        .read(move |tx| SqliteContentService::sqlite(tx)?.get_analysis(id))
        .await?;
    Ok(Json(analysis))
}

pub async fn put_analysis(
    State(state): State<AppState>,
    id: Result<Path<ContentItemId>, PathRejection>,
    body: Result<Json<AnalysisInput>, JsonRejection>,
) -> Result<Json<PhilosophicalAnalysis>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let analysis = state
        .db
        .unit_of_work(move |tx| SqliteContentService::sqlite(tx)?.put_analysis(id, &input))
        .await?;
    Ok(Json(analysis))
}
