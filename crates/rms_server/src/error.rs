//! HTTP error boundary.
//!
//! # Responsibility
//! - Translate `ServiceError` and extractor rejections into status codes and
//!   JSON bodies, in one place.
//!
//! # Invariants
//! - Client errors carry a `detail` reason; enum errors also list
//!   `valid_values`.
//! - Internal errors are logged in full and answered with a generic message
//!   plus timestamp; details never reach the caller.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use rms_core::logging::sanitize_message;
use rms_core::ServiceError;
use serde_json::json;
use std::fmt::{Display, Formatter};

const MAX_LOGGED_DETAIL_CHARS: usize = 512;

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Request body, query or path did not match the expected shape.
    Unprocessable(String),
    /// Failure outside the service layer (e.g. a blocking task panicked).
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Unprocessable(message) => write!(f, "unprocessable request: {message}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Unprocessable(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::Unprocessable(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Unprocessable(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Service(err) if !err.is_client_error() => internal_error(&err.to_string()),
            Self::Service(ServiceError::InvalidEnum(invalid)) => {
                warn!(
                    "event=request_rejected module=server status=400 kind={} value={}",
                    invalid.kind,
                    sanitize_message(&invalid.value, MAX_LOGGED_DETAIL_CHARS)
                );
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "detail": invalid.to_string(),
                        "valid_values": invalid.valid_values,
                    })),
                )
                    .into_response()
            }
            Self::Service(ServiceError::Constraint(violation)) => {
                client_error(StatusCode::UNPROCESSABLE_ENTITY, violation.to_string())
            }
            Self::Unprocessable(message) => client_error(StatusCode::UNPROCESSABLE_ENTITY, message),
            // Remaining client errors are the not-found variants.
            Self::Service(err) => client_error(StatusCode::NOT_FOUND, err.to_string()),
            Self::Internal(message) => internal_error(&message),
        }
    }
}

fn client_error(status: StatusCode, detail: String) -> Response {
    warn!(
        "event=request_rejected module=server status={} detail={}",
        status.as_u16(),
        sanitize_message(&detail, MAX_LOGGED_DETAIL_CHARS)
    );
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn internal_error(details: &str) -> Response {
    error!(
        "event=request_failed module=server status=500 error={}",
        sanitize_message(details, MAX_LOGGED_DETAIL_CHARS)
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "An unexpected error occurred",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rms_core::{Rasa, RepoError, ServiceError};

    #[test]
    fn taxonomy_maps_to_status_codes() {
        let invalid = Rasa::parse("nope").unwrap_err();
        let cases = [
            (ApiError::from(ServiceError::InvalidEnum(invalid)), StatusCode::BAD_REQUEST),
            (
                ApiError::from(ServiceError::from(rms_core::validate_rating_value(11).unwrap_err())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(ServiceError::from(RepoError::NotFound {
                    entity: "Project",
                    id: 1,
                })),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::from(ServiceError::AnalysisNotFound(3)), StatusCode::NOT_FOUND),
            (
                ApiError::from(ServiceError::InconsistentState("lost row")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(ServiceError::from(RepoError::InvalidData(
                    "bad rasa column".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Unprocessable("bad".to_string()), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
