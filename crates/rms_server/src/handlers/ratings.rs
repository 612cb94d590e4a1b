//! GET  /ratings  list ratings, optionally for one project
//! POST /ratings  create a rating

use crate::error::ApiError;
use crate::handlers::FilteredPageParams;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rms_core::{NewRating, Rating, RatingListQuery, SqliteRatingService};

pub async fn list_ratings(
    State(state): State<AppState>,
    params: Result<Query<FilteredPageParams>, QueryRejection>,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let Query(params) = params?;
    let query = RatingListQuery {
        project_id: params.project_id,
        page: params.page(),
    };
    let ratings = state
        .db
        .read(move |tx| SqliteRatingService::sqlite(tx)?.list_ratings(&query))
        .await?;
    Ok(Json(ratings))
}

pub async fn create_rating(
    State(state): State<AppState>,
    body: Result<Json<NewRating>, JsonRejection>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    let Json(input) = body?;
    let rating = state
        .db
        .unit_of_work(move |tx| SqliteRatingService::sqlite(tx)?.create_rating(&input))
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}
