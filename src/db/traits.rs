// Database trait — backend-agnostic async interface for all DB operations.
//
// Implementor: SqliteDatabase (wraps rusqlite). All methods are async so a
// native-async backend could sit behind the same interface later without
// touching callers.
//
// The trait mirrors the queries.rs function signatures, so callers hold an
// `Arc<dyn Database>` and never see a Connection.

use anyhow::Result;
use async_trait::async_trait;

use crate::extract::ExtractionResult;

use super::models::{Draft, Post, SourceKind, StoreCounts, StoredExtraction};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Documents ---

    /// Store a plain-text document and return its id.
    async fn insert_post(&self, title: &str, content: &str) -> Result<i64>;

    /// Load a plain-text document by id.
    async fn get_post(&self, id: i64) -> Result<Option<Post>>;

    /// Store a draft document (JSON envelope body) and return its id.
    async fn insert_draft(&self, title: &str, body_json: &str) -> Result<i64>;

    /// Load a draft document by id.
    async fn get_draft(&self, id: i64) -> Result<Option<Draft>>;

    // --- Extractions ---

    /// Persist one extraction run and return its id.
    async fn save_extraction(
        &self,
        source_kind: SourceKind,
        source_id: Option<i64>,
        title: &str,
        result: &ExtractionResult,
        enriched: bool,
    ) -> Result<i64>;

    /// Load a stored extraction by id.
    async fn get_extraction(&self, id: i64) -> Result<Option<StoredExtraction>>;

    /// Recent extraction runs, newest first.
    async fn get_recent_extractions(&self, limit: u32) -> Result<Vec<StoredExtraction>>;

    /// The most recent extraction for a given document, if any.
    async fn get_latest_extraction_for(
        &self,
        source_kind: SourceKind,
        source_id: i64,
    ) -> Result<Option<StoredExtraction>>;

    // --- Status ---

    /// Row counts per table, for status displays.
    async fn counts(&self) -> Result<StoreCounts>;

    /// Timestamp of the most recent extraction run.
    async fn last_extraction_at(&self) -> Result<Option<String>>;
}
