use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::config::DbConfig;
use crate::db;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
pub struct UnhealthyResponse {
    status: &'static str,
    error: String,
}

pub async fn health_check(State(config): State<DbConfig>) -> Response {
    match db::ping(&config).await {
        Ok(()) => {
            let response = HealthResponse {
                status: "healthy",
                service: "stats-api",
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            let response = UnhealthyResponse {
                status: "unhealthy",
                error: err.to_string(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}
