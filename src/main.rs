use axum::{
    routing::{get, post},
    Router,
};
use std::net::{Ipv4Addr, SocketAddr};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod models;
mod routes;

use config::{Config, DbConfig};

fn app(db: DbConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/stats", get(routes::stats::get_stats))
        .route("/api/play/{game}", post(routes::stats::play_game))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Stats API server running on port {}", config.port);

    // Schema setup retries in the background while requests are served.
    let db = config.db.clone();
    tokio::spawn(async move {
        db::init_database(&db).await;
    });

    axum::serve(listener, app(config.db))
        .await
        .expect("Failed to start server.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // Nothing listens here, so every query path fails fast with a
    // connection error.
    fn unreachable_db() -> DbConfig {
        DbConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            name: "gamedb".to_string(),
            user: "gameuser".to_string(),
            password: "gamepass123".to_string(),
        }
    }

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_unhealthy_when_database_is_unreachable() {
        let response = app(unreachable_db())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["status"], "unhealthy");
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn stats_surfaces_database_failure_as_generic_500() {
        let response = app(unreachable_db())
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Failed to fetch stats");
    }

    #[tokio::test]
    async fn play_surfaces_database_failure_as_generic_500() {
        let response = app(unreachable_db())
            .oneshot(Request::post("/api/play/doom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Failed to update play count");
    }

    #[tokio::test]
    async fn play_rejects_get_requests() {
        let response = app(unreachable_db())
            .oneshot(Request::get("/api/play/doom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_routes_fall_through_to_404() {
        let response = app(unreachable_db())
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = app(unreachable_db())
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
