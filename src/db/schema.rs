// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run, and each migration is a function that
// executes SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Plain-text documents imported or synced from a site
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Draft documents: the editor stores a JSON envelope whose
        -- .content field holds the actual text
        CREATE TABLE IF NOT EXISTS drafts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body_json TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per extraction run; keywords and topics stored as JSON
        -- so the result structure can evolve without migrations
        CREATE TABLE IF NOT EXISTS extractions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_kind TEXT NOT NULL,         -- 'post', 'draft', or 'inline'
            source_id INTEGER,                 -- null for inline input
            title TEXT NOT NULL,
            keywords_json TEXT NOT NULL,
            topics_json TEXT NOT NULL,
            extracted_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for looking up extractions by their source document
        CREATE INDEX IF NOT EXISTS idx_extractions_source
            ON extractions(source_kind, source_id);

        -- Index for the recent-extractions listing
        CREATE INDEX IF NOT EXISTS idx_extractions_age
            ON extractions(extracted_at);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: add enriched column to extractions. Records whether
    // difficulty enrichment was applied, so reports can tell raw scores
    // from boosted ones.
    run_migration(conn, 2, |c| {
        c.execute_batch("ALTER TABLE extractions ADD COLUMN enriched INTEGER NOT NULL DEFAULT 0;")
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Running create_tables twice should not error
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, posts, drafts, extractions = 4 tables
        // (sqlite_sequence is excluded by the sqlite_% filter)
        assert_eq!(count, 4i64);
    }

    #[test]
    fn test_migration_v2_adds_enriched_column() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO extractions (source_kind, source_id, title, keywords_json, topics_json, enriched)
             VALUES ('inline', NULL, 'test', '[]', '[]', 1)",
            [],
        )
        .unwrap();

        let enriched: i64 = conn
            .query_row("SELECT enriched FROM extractions LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(enriched, 1);
    }

    #[test]
    fn test_migration_v2_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Run create_tables three times — the migration should only run once
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let versions: Vec<i64> = conn
            .prepare("SELECT version FROM schema_version ORDER BY version")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(versions, vec![1, 2]);
    }
}
