// GET /api/extractions — the stored extraction log.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Max rows to return (default 20, capped at 200).
    pub limit: Option<u32>,
}

/// GET /api/extractions — recent extraction runs, newest first.
pub async fn list_extractions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(20).min(200);

    match state.db.get_recent_extractions(limit).await {
        Ok(extractions) => Json(serde_json::json!({ "extractions": extractions })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error listing extractions");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/extractions/{id} — one stored extraction.
pub async fn get_extraction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.db.get_extraction(id).await {
        Ok(Some(extraction)) => Json(extraction).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, &format!("No extraction with id {id}")),
        Err(e) => {
            tracing::error!(error = %e, "DB error fetching extraction");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
