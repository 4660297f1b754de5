// GET /api/status — store counts and server time.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::web::{api_error, AppState};

/// GET /api/status — document/extraction counts for the dashboard header.
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let counts = match state.db.counts().await {
        Ok(counts) => counts,
        Err(e) => {
            tracing::error!(error = %e, "DB error fetching counts");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    let last_extraction_at = match state.db.last_extraction_at().await {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "DB error fetching last extraction time");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    Json(serde_json::json!({
        "posts": counts.posts,
        "drafts": counts.drafts,
        "extractions": counts.extractions,
        "last_extraction_at": last_extraction_at,
        "enrichment_configured": state.metrics.is_some(),
        "server_time": Utc::now().to_rfc3339(),
    }))
    .into_response()
}
