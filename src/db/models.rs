// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::extract::ExtractionResult;

/// A plain-text document: title plus opaque content (HTML/Markdown/text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

/// A draft document. Its content lives inside a JSON envelope carrying a
/// `.content` string — the shape a CMS editor autosaves — which the
/// pipeline unwraps into plain text before extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub title: String,
    pub body_json: String,
    pub created_at: String,
}

/// Which kind of document an extraction was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Post,
    Draft,
    /// Raw title/content supplied directly by the caller, not stored as
    /// a document.
    Inline,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Post => "post",
            SourceKind::Draft => "draft",
            SourceKind::Inline => "inline",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "post" => Some(SourceKind::Post),
            "draft" => Some(SourceKind::Draft),
            "inline" => Some(SourceKind::Inline),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One persisted extraction run — the append-only log read by `report`
/// and the web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredExtraction {
    pub id: i64,
    pub source_kind: SourceKind,
    /// Document id for post/draft sources; None for inline input.
    pub source_id: Option<i64>,
    /// Title snapshot at extraction time, for display.
    pub title: String,
    pub result: ExtractionResult,
    /// Whether difficulty enrichment was applied to the scores.
    pub enriched: bool,
    pub extracted_at: String,
}

/// Aggregate counts for the status display and the web status route.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StoreCounts {
    pub posts: i64,
    pub drafts: i64,
    pub extractions: i64,
}
