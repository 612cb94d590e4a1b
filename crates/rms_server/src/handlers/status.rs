//! Unprefixed service status routes.

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

/// GET / : service banner.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "active",
        "message": "Welcome to RMS API",
        "version": env!("CARGO_PKG_VERSION"),
        "api_prefix": &*state.api_prefix,
    }))
}

/// GET /health : liveness plus a database probe.
///
/// Always 200; a failed probe is reported as `"database": "down"`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = if state.db.ping().await { "up" } else { "down" };
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "services": {
            "api": "up",
            "database": database,
        },
    }))
}
