// System status display — shows DB stats and the last extraction time.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};

use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `quarry init` to set up the database.");
        return Ok(());
    }

    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let counts = db.counts().await?;
    println!(
        "Documents: {} posts, {} drafts",
        counts.posts, counts.drafts
    );
    println!("Extractions stored: {}", counts.extractions);

    match db.last_extraction_at().await? {
        Some(when) => match relative_age(&when) {
            Some(age) => println!("Last extraction: {when} ({age})"),
            None => println!("Last extraction: {when}"),
        },
        None => {
            println!("Last extraction: never");
            println!("  Run `quarry extract` to analyze a document");
        }
    }

    Ok(())
}

/// Render a SQLite `datetime('now')` timestamp as a rough relative age.
fn relative_age(timestamp: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").ok()?;
    let elapsed = Utc::now().naive_utc() - parsed;

    let minutes = elapsed.num_minutes();
    if minutes < 0 {
        return None;
    }
    Some(if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    })
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
