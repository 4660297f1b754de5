// Batch extraction pipeline: run many local files through the extractor.
//
// Files are processed concurrently up to a cap — extraction itself is
// cheap, but each document may involve a difficulty lookup, and those are
// network calls worth overlapping. Failures are counted and logged per
// file; one bad document never aborts the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::db::Database;
use crate::extract::ExtractOptions;
use crate::metrics::DifficultyProvider;

use super::extract::{run, DocumentSource};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Extract every file in `paths`, persisting each result.
///
/// Returns how many files were processed and how many failed. Failures
/// are logged as warnings with the offending path.
pub async fn run_batch(
    db: &Arc<dyn Database>,
    paths: &[PathBuf],
    provider: Option<&dyn DifficultyProvider>,
    options: &ExtractOptions,
    enrich_timeout: Duration,
    concurrency: usize,
) -> Result<BatchSummary> {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
            .expect("progress template"),
    );

    let outcomes: Vec<bool> = stream::iter(paths)
        .map(|path| {
            let pb = &pb;
            async move {
                let ok = match extract_file(db, path, provider, options, enrich_timeout).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping file");
                        false
                    }
                };
                pb.inc(1);
                ok
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    pb.finish_and_clear();

    let processed = outcomes.iter().filter(|ok| **ok).count();
    Ok(BatchSummary {
        processed,
        failed: outcomes.len() - processed,
    })
}

async fn extract_file(
    db: &Arc<dyn Database>,
    path: &Path,
    provider: Option<&dyn DifficultyProvider>,
    options: &ExtractOptions,
    enrich_timeout: Duration,
) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    let (title, body) = split_title_body(&text, path);

    run(
        db,
        DocumentSource::Inline { title, body },
        provider,
        options,
        enrich_timeout,
        true,
    )
    .await?;
    Ok(())
}

/// Split a document file into (title, body).
///
/// A leading Markdown H1 becomes the title; otherwise the file stem does,
/// and the whole text is the body.
pub fn split_title_body(text: &str, path: &Path) -> (String, String) {
    let mut lines = text.lines();
    for line in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(heading) = trimmed.strip_prefix("# ") {
            let body: String = lines.collect::<Vec<_>>().join("\n");
            return (heading.trim().to_string(), body);
        }
        break;
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['-', '_'], " "))
        .unwrap_or_default();
    (stem, text.to_string())
}
