//! Router construction.

use crate::handlers::{content, projects, ratings, status};
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::middleware as axum_mw;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

/// Builds the full router: versioned API routes under `state.api_prefix`,
/// plus the unprefixed `/` and `/health` routes.
pub fn build_router(state: AppState) -> Router {
    // Collection routes accept both `/x` and `/x/`.
    let api = Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/:id", get(projects::get_project))
        .route(
            "/ratings",
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route(
            "/ratings/",
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route(
            "/content-items",
            get(content::list_content_items).post(content::create_content_item),
        )
        .route(
            "/content-items/",
            get(content::list_content_items).post(content::create_content_item),
        )
        .route("/content-items/:id", get(content::get_content_item))
        .route(
            "/content-items/:id/analysis",
            get(content::get_analysis).put(content::put_analysis),
        );

    let public = Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health));

    let routes = if state.api_prefix.is_empty() {
        public.merge(api)
    } else {
        public.nest(&state.api_prefix, api)
    };

    routes
        .layer(axum_mw::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
