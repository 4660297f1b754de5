// Web server — Axum-based JSON API wrapping the extraction pipeline.
//
// All routes serve JSON; there is no UI here (the dashboard frontend is a
// separate deployment and out of this crate's scope) and no auth. The
// wrapper's job is exactly: resolve a document, run the pipeline, persist,
// and return the result.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::metrics::DifficultyProvider;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    /// Difficulty provider, present when QUARRY_METRICS_URL is set.
    pub metrics: Option<Arc<dyn DifficultyProvider>>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    db: Arc<dyn Database>,
    metrics: Option<Arc<dyn DifficultyProvider>>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        db,
        config: Arc::new(config),
        metrics,
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Quarry API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble the route table. Split out from run_server so tests can drive
/// the router directly with tower's oneshot.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/extract", post(handlers::extract::run_extraction))
        .route(
            "/api/extractions",
            get(handlers::extractions::list_extractions),
        )
        .route(
            "/api/extractions/{id}",
            get(handlers::extractions::get_extraction),
        )
        .route("/api/status", get(handlers::status::get_status))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deployment health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
