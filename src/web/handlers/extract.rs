// POST /api/extract — run the extraction pipeline for one document.
//
// The request names exactly one source: a stored post id, a stored draft
// id (whose JSON envelope is unwrapped server-side), or raw title/content.
// The result is persisted and returned in the same response.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::extract::ExtractOptions;
use crate::pipeline::{self, DocumentSource};
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub post_id: Option<i64>,
    pub draft_id: Option<i64>,
    pub max_keywords: Option<usize>,
    pub max_topics: Option<usize>,
}

impl ExtractRequest {
    /// Resolve the request to a single document source, rejecting
    /// ambiguous combinations.
    fn source(&self) -> Result<DocumentSource, &'static str> {
        let has_inline = self.title.is_some() || self.content.is_some();
        match (self.post_id, self.draft_id, has_inline) {
            (Some(id), None, false) => Ok(DocumentSource::Post(id)),
            (None, Some(id), false) => Ok(DocumentSource::Draft(id)),
            (None, None, true) => Ok(DocumentSource::Inline {
                title: self.title.clone().unwrap_or_default(),
                body: self.content.clone().unwrap_or_default(),
            }),
            (None, None, false) => Err("Provide post_id, draft_id, or title/content"),
            _ => Err("Provide exactly one of post_id, draft_id, or title/content"),
        }
    }
}

/// POST /api/extract — extract, persist, and return keywords and topics.
pub async fn run_extraction(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> impl IntoResponse {
    let source = match request.source() {
        Ok(source) => source,
        Err(message) => return api_error(StatusCode::BAD_REQUEST, message),
    };

    let options = ExtractOptions {
        max_keywords: request.max_keywords,
        max_topics: request.max_topics,
        difficulty: None,
    };

    let provider = state.metrics.as_deref();

    match pipeline::run(
        &state.db,
        source,
        provider,
        &options,
        state.config.metrics_timeout(),
        true,
    )
    .await
    {
        Ok(outcome) => Json(serde_json::json!({
            "extraction_id": outcome.extraction_id,
            "title": outcome.title,
            "keywords": outcome.result.keywords,
            "topics": outcome.result.topics,
            "enriched": outcome.enriched,
        }))
        .into_response(),
        Err(e) => classify_pipeline_error(e),
    }
}

/// Map pipeline failures onto HTTP statuses.
///
/// Empty input is the caller's mistake (400); a missing document id is
/// 404; everything else is a server-side failure.
fn classify_pipeline_error(error: anyhow::Error) -> axum::response::Response {
    if error
        .chain()
        .any(|cause| cause.downcast_ref::<crate::extract::ExtractError>().is_some())
    {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Nothing to extract: both title and content are empty",
        );
    }

    let message = error.to_string();
    if message.starts_with("No post with id") || message.starts_with("No draft with id") {
        return api_error(StatusCode::NOT_FOUND, &message);
    }

    tracing::error!(error = %error, "Extraction pipeline failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Extraction failed")
}
