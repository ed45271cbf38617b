use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the API handlers. Database errors are logged
/// server-side; clients only ever see the generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("game not found")]
    GameNotFound,
    #[error("failed to fetch stats")]
    FetchStats(#[source] sqlx::Error),
    #[error("failed to update play count")]
    UpdatePlayCount(#[source] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::GameNotFound => (StatusCode::NOT_FOUND, "Game not found"),
            ApiError::FetchStats(err) => {
                tracing::error!("Error fetching stats: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch stats")
            }
            ApiError::UpdatePlayCount(err) => {
                tracing::error!("Error updating play count: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update play count")
            }
        };

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });

        (status, body).into_response()
    }
}
