use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error taxonomy for every domain operation. Each variant maps onto one
/// HTTP status in [`IntoResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range identifier/payload.
    #[error("{0}")]
    InvalidArgument(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A plan already exists for the requested week; carries its id so the
    /// caller can redirect instead of duplicating state.
    #[error("Plan already exists for this week")]
    WeekTaken { plan_id: i64 },

    /// Operation not permitted in the plan's current lifecycle status.
    #[error("{0}")]
    InvalidState(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidArgument(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::WeekTaken { plan_id } => (
                StatusCode::CONFLICT,
                json!({ "error": self.to_string(), "plan_id": plan_id }),
            ),
            ApiError::InvalidState(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Path and body ids must be positive rowids.
pub fn check_id(id: i64, what: &str) -> ApiResult<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(ApiError::InvalidArgument(format!("Invalid {what} ID")))
    }
}
