// Single-document extraction pipeline: resolve -> extract -> enrich -> persist.
//
// "Compute extraction" and "persist extraction" are two separate steps
// with no atomicity between them; concurrent re-extraction of the same
// document simply appends two rows. Enrichment sits between them and is
// strictly best-effort — a dead or slow metrics service downgrades the
// result to un-enriched scores, never to an error.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::db::models::SourceKind;
use crate::db::Database;
use crate::extract::{extract, recommend::recommend, ExtractOptions, ExtractionResult};
use crate::metrics::DifficultyProvider;

/// Where the pipeline should get its title/body pair from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// A stored plain-text document.
    Post(i64),
    /// A stored draft; its JSON envelope is unwrapped to the `.content`
    /// string before extraction.
    Draft(i64),
    /// Raw input supplied directly by the caller.
    Inline { title: String, body: String },
}

impl DocumentSource {
    fn kind(&self) -> SourceKind {
        match self {
            DocumentSource::Post(_) => SourceKind::Post,
            DocumentSource::Draft(_) => SourceKind::Draft,
            DocumentSource::Inline { .. } => SourceKind::Inline,
        }
    }

    fn id(&self) -> Option<i64> {
        match self {
            DocumentSource::Post(id) | DocumentSource::Draft(id) => Some(*id),
            DocumentSource::Inline { .. } => None,
        }
    }
}

/// The pipeline's output: the stored row id (None when persistence was
/// skipped) plus the computed result.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub extraction_id: Option<i64>,
    pub title: String,
    pub result: ExtractionResult,
    pub enriched: bool,
}

/// Run the full pipeline for one document.
///
/// `provider` is consulted only when present; `enrich_timeout` bounds the
/// lookup so the otherwise O(input) computation can't stall on I/O. When
/// `persist` is false the database is only used for document resolution.
pub async fn run(
    db: &Arc<dyn Database>,
    source: DocumentSource,
    provider: Option<&dyn DifficultyProvider>,
    options: &ExtractOptions,
    enrich_timeout: Duration,
    persist: bool,
) -> Result<PipelineOutcome> {
    let (title, body) = resolve(db, &source).await?;

    let mut result = extract(&title, &body, options)
        .with_context(|| format!("Extraction failed for {} source", source.kind()))?;

    let enriched = match provider {
        Some(provider) => enrich_best_effort(&mut result, provider, options, enrich_timeout).await,
        None => false,
    };

    let extraction_id = if persist {
        let id = db
            .save_extraction(source.kind(), source.id(), &title, &result, enriched)
            .await?;
        info!(
            extraction_id = id,
            keywords = result.keywords.len(),
            topics = result.topics.len(),
            enriched,
            "Extraction stored"
        );
        Some(id)
    } else {
        None
    };

    Ok(PipelineOutcome {
        extraction_id,
        title,
        result,
        enriched,
    })
}

/// Fetch the (title, body) pair for a source.
async fn resolve(db: &Arc<dyn Database>, source: &DocumentSource) -> Result<(String, String)> {
    match source {
        DocumentSource::Post(id) => {
            let post = db
                .get_post(*id)
                .await?
                .with_context(|| format!("No post with id {id}"))?;
            Ok((post.title, post.content))
        }
        DocumentSource::Draft(id) => {
            let draft = db
                .get_draft(*id)
                .await?
                .with_context(|| format!("No draft with id {id}"))?;
            let body = unwrap_draft_body(&draft.body_json)
                .with_context(|| format!("Draft {id} has a malformed body envelope"))?;
            Ok((draft.title, body))
        }
        DocumentSource::Inline { title, body } => Ok((title.clone(), body.clone())),
    }
}

/// Pull the `.content` string out of a draft's JSON envelope.
fn unwrap_draft_body(body_json: &str) -> Result<String> {
    let envelope: serde_json::Value =
        serde_json::from_str(body_json).context("Body is not valid JSON")?;
    let content = envelope
        .get("content")
        .and_then(|v| v.as_str())
        .context("Envelope has no string `content` field")?;
    Ok(content.to_string())
}

/// Try to enrich in place; on any failure keep the raw scores.
///
/// Returns whether enrichment was actually applied. Topics are re-derived
/// after enrichment so they inherit the adjusted keyword scores.
async fn enrich_best_effort(
    result: &mut ExtractionResult,
    provider: &dyn DifficultyProvider,
    options: &ExtractOptions,
    enrich_timeout: Duration,
) -> bool {
    if result.keywords.is_empty() {
        return false;
    }

    let terms: Vec<String> = result.keywords.iter().map(|k| k.keyword.clone()).collect();

    match timeout(enrich_timeout, provider.lookup(&terms)).await {
        Ok(Ok(difficulty)) => {
            crate::extract::enrich(&mut result.keywords, &difficulty);
            result.topics = recommend(&result.keywords, options.max_topics());
            true
        }
        Ok(Err(e)) => {
            warn!(provider = provider.name(), error = %e, "Difficulty lookup failed, keeping raw scores");
            false
        }
        Err(_) => {
            warn!(
                provider = provider.name(),
                timeout_ms = enrich_timeout.as_millis() as u64,
                "Difficulty lookup timed out, keeping raw scores"
            );
            false
        }
    }
}
