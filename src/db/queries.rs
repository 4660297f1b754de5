// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::extract::{ExtractionResult, RecommendedTopic, ScoredKeyword};

use super::models::{Draft, Post, SourceKind, StoreCounts, StoredExtraction};

// --- Posts ---

/// Insert a plain-text document, returning its id.
pub fn insert_post(conn: &Connection, title: &str, content: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO posts (title, content) VALUES (?1, ?2)",
        params![title, content],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_post(conn: &Connection, id: i64) -> Result<Option<Post>> {
    let mut stmt =
        conn.prepare("SELECT id, title, content, created_at FROM posts WHERE id = ?1")?;
    let result = stmt
        .query_row(params![id], |row| {
            Ok(Post {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;
    Ok(result)
}

// --- Drafts ---

/// Insert a draft document. `body_json` must be a JSON envelope whose
/// `.content` field carries the text; validity is the caller's problem
/// until extraction time.
pub fn insert_draft(conn: &Connection, title: &str, body_json: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO drafts (title, body_json) VALUES (?1, ?2)",
        params![title, body_json],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_draft(conn: &Connection, id: i64) -> Result<Option<Draft>> {
    let mut stmt =
        conn.prepare("SELECT id, title, body_json, created_at FROM drafts WHERE id = ?1")?;
    let result = stmt
        .query_row(params![id], |row| {
            Ok(Draft {
                id: row.get(0)?,
                title: row.get(1)?,
                body_json: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;
    Ok(result)
}

// --- Extractions ---

/// Persist one extraction run, returning its id.
///
/// Keywords and topics are stored as JSON arrays in array order, so a
/// re-read yields the exact ranked sequence that was computed.
pub fn insert_extraction(
    conn: &Connection,
    source_kind: SourceKind,
    source_id: Option<i64>,
    title: &str,
    result: &ExtractionResult,
    enriched: bool,
) -> Result<i64> {
    let keywords_json = serde_json::to_string(&result.keywords)?;
    let topics_json = serde_json::to_string(&result.topics)?;
    conn.execute(
        "INSERT INTO extractions (source_kind, source_id, title, keywords_json, topics_json, enriched)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            source_kind.as_str(),
            source_id,
            title,
            keywords_json,
            topics_json,
            enriched,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn extraction_from_row(row: &Row<'_>) -> rusqlite::Result<(StoredExtraction, String, String)> {
    let kind_str: String = row.get(1)?;
    let keywords_json: String = row.get(4)?;
    let topics_json: String = row.get(5)?;
    let extraction = StoredExtraction {
        id: row.get(0)?,
        source_kind: SourceKind::parse(&kind_str).unwrap_or(SourceKind::Inline),
        source_id: row.get(2)?,
        title: row.get(3)?,
        result: ExtractionResult::default(),
        enriched: row.get(6)?,
        extracted_at: row.get(7)?,
    };
    Ok((extraction, keywords_json, topics_json))
}

fn hydrate(
    (mut extraction, keywords_json, topics_json): (StoredExtraction, String, String),
) -> Result<StoredExtraction> {
    let keywords: Vec<ScoredKeyword> =
        serde_json::from_str(&keywords_json).context("Corrupt keywords_json in extractions row")?;
    let topics: Vec<RecommendedTopic> =
        serde_json::from_str(&topics_json).context("Corrupt topics_json in extractions row")?;
    extraction.result = ExtractionResult { keywords, topics };
    Ok(extraction)
}

const EXTRACTION_COLUMNS: &str =
    "id, source_kind, source_id, title, keywords_json, topics_json, enriched, extracted_at";

pub fn get_extraction(conn: &Connection, id: i64) -> Result<Option<StoredExtraction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXTRACTION_COLUMNS} FROM extractions WHERE id = ?1"
    ))?;
    let raw = stmt.query_row(params![id], extraction_from_row).optional()?;
    raw.map(hydrate).transpose()
}

/// Recent extraction runs, newest first.
pub fn get_recent_extractions(conn: &Connection, limit: u32) -> Result<Vec<StoredExtraction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXTRACTION_COLUMNS} FROM extractions ORDER BY id DESC LIMIT ?1"
    ))?;
    let rows = stmt.query_map(params![limit], extraction_from_row)?;

    let mut extractions = Vec::new();
    for row in rows {
        extractions.push(hydrate(row?)?);
    }
    Ok(extractions)
}

/// The most recent extraction for a given document, if any.
pub fn get_latest_extraction_for(
    conn: &Connection,
    source_kind: SourceKind,
    source_id: i64,
) -> Result<Option<StoredExtraction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXTRACTION_COLUMNS} FROM extractions
         WHERE source_kind = ?1 AND source_id = ?2
         ORDER BY id DESC LIMIT 1"
    ))?;
    let raw = stmt
        .query_row(params![source_kind.as_str(), source_id], extraction_from_row)
        .optional()?;
    raw.map(hydrate).transpose()
}

// --- Status ---

pub fn counts(conn: &Connection) -> Result<StoreCounts> {
    let posts: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
    let drafts: i64 = conn.query_row("SELECT COUNT(*) FROM drafts", [], |row| row.get(0))?;
    let extractions: i64 =
        conn.query_row("SELECT COUNT(*) FROM extractions", [], |row| row.get(0))?;
    Ok(StoreCounts {
        posts,
        drafts,
        extractions,
    })
}

pub fn last_extraction_at(conn: &Connection) -> Result<Option<String>> {
    let mut stmt =
        conn.prepare("SELECT extracted_at FROM extractions ORDER BY id DESC LIMIT 1")?;
    let result = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::extract::{extract, ExtractOptions};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn post_round_trip() {
        let conn = test_conn();
        let id = insert_post(&conn, "Title", "Body text").unwrap();
        let post = get_post(&conn, id).unwrap().unwrap();
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Body text");
        assert!(get_post(&conn, id + 1).unwrap().is_none());
    }

    #[test]
    fn draft_round_trip() {
        let conn = test_conn();
        let id = insert_draft(&conn, "Draft", r#"{"content":"hello"}"#).unwrap();
        let draft = get_draft(&conn, id).unwrap().unwrap();
        assert_eq!(draft.body_json, r#"{"content":"hello"}"#);
    }

    #[test]
    fn extraction_round_trip_preserves_order() {
        let conn = test_conn();
        let result = extract(
            "rust async",
            "rust async runtimes make rust async code fast",
            &ExtractOptions::default(),
        )
        .unwrap();

        let id = insert_extraction(&conn, SourceKind::Inline, None, "rust async", &result, false)
            .unwrap();
        let stored = get_extraction(&conn, id).unwrap().unwrap();

        assert_eq!(stored.result, result);
        assert_eq!(stored.source_kind, SourceKind::Inline);
        assert_eq!(stored.source_id, None);
        assert!(!stored.enriched);
    }

    #[test]
    fn recent_extractions_newest_first() {
        let conn = test_conn();
        let result = extract("one", "two three", &ExtractOptions::default()).unwrap();
        let first =
            insert_extraction(&conn, SourceKind::Inline, None, "first", &result, false).unwrap();
        let second =
            insert_extraction(&conn, SourceKind::Inline, None, "second", &result, false).unwrap();

        let recent = get_recent_extractions(&conn, 10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, second);
        assert_eq!(recent[1].id, first);

        let limited = get_recent_extractions(&conn, 1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn latest_extraction_for_document() {
        let conn = test_conn();
        let post_id = insert_post(&conn, "Doc", "rust rust rust").unwrap();
        let result = extract("Doc", "rust rust rust", &ExtractOptions::default()).unwrap();

        insert_extraction(&conn, SourceKind::Post, Some(post_id), "Doc", &result, false).unwrap();
        let newer =
            insert_extraction(&conn, SourceKind::Post, Some(post_id), "Doc", &result, true)
                .unwrap();

        let latest = get_latest_extraction_for(&conn, SourceKind::Post, post_id)
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, newer);
        assert!(latest.enriched);

        assert!(get_latest_extraction_for(&conn, SourceKind::Draft, post_id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn counts_reflect_inserts() {
        let conn = test_conn();
        insert_post(&conn, "a", "b").unwrap();
        insert_draft(&conn, "c", "{}").unwrap();
        let counts = counts(&conn).unwrap();
        assert_eq!(counts.posts, 1);
        assert_eq!(counts.drafts, 1);
        assert_eq!(counts.extractions, 0);
        assert!(last_extraction_at(&conn).unwrap().is_none());
    }
}
