// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.
//
// The free functions in queries.rs remain directly testable against a
// Connection; this type is just the async adapter over them.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::extract::ExtractionResult;

use super::models::{Draft, Post, SourceKind, StoreCounts, StoredExtraction};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_post(&self, title: &str, content: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_post(&conn, title, content)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let conn = self.conn.lock().await;
        super::queries::get_post(&conn, id)
    }

    async fn insert_draft(&self, title: &str, body_json: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_draft(&conn, title, body_json)
    }

    async fn get_draft(&self, id: i64) -> Result<Option<Draft>> {
        let conn = self.conn.lock().await;
        super::queries::get_draft(&conn, id)
    }

    async fn save_extraction(
        &self,
        source_kind: SourceKind,
        source_id: Option<i64>,
        title: &str,
        result: &ExtractionResult,
        enriched: bool,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_extraction(&conn, source_kind, source_id, title, result, enriched)
    }

    async fn get_extraction(&self, id: i64) -> Result<Option<StoredExtraction>> {
        let conn = self.conn.lock().await;
        super::queries::get_extraction(&conn, id)
    }

    async fn get_recent_extractions(&self, limit: u32) -> Result<Vec<StoredExtraction>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_extractions(&conn, limit)
    }

    async fn get_latest_extraction_for(
        &self,
        source_kind: SourceKind,
        source_id: i64,
    ) -> Result<Option<StoredExtraction>> {
        let conn = self.conn.lock().await;
        super::queries::get_latest_extraction_for(&conn, source_kind, source_id)
    }

    async fn counts(&self) -> Result<StoreCounts> {
        let conn = self.conn.lock().await;
        super::queries::counts(&conn)
    }

    async fn last_extraction_at(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::last_extraction_at(&conn)
    }
}
