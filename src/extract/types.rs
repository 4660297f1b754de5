// Extraction result types — the structures that flow out of the core.
//
// These are the types every invocation context (CLI, batch, web wrapper)
// consumes. They're serde-serializable so the database layer and the JSON
// API can persist and return them without translation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enrich::DifficultyMap;

/// Where a keyword was attributed from.
///
/// A keyword is attributed to the title only when the verbatim keyword
/// string appears in the title token set. Bigrams are space-joined pairs
/// and the title token set holds single words, so bigrams always attribute
/// to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    Title,
    Body,
}

/// A single ranked keyword — a lowercase unigram or space-joined bigram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub keyword: String,
    /// Normalized relevance in [0, 1], rounded to two decimals.
    pub score: f64,
    pub source: KeywordSource,
}

/// A human-readable topic suggestion derived from a top keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTopic {
    pub topic: String,
    /// Inherits the source keyword's score with a positional decay.
    pub score: f64,
    pub reason: String,
}

/// The complete output of one extraction call.
///
/// `keywords` is in descending score order; `topics` derive 1:1 from the
/// top keywords in the same order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub keywords: Vec<ScoredKeyword>,
    pub topics: Vec<RecommendedTopic>,
}

/// Tuning knobs for one extraction call.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Keep at most this many keywords (None = library default of 15).
    pub max_keywords: Option<usize>,
    /// Derive at most this many topics (None = library default of 6).
    pub max_topics: Option<usize>,
    /// Per-keyword difficulty data, applied after ranking when present.
    pub difficulty: Option<DifficultyMap>,
}

impl ExtractOptions {
    pub fn max_keywords(&self) -> usize {
        self.max_keywords.unwrap_or(super::DEFAULT_MAX_KEYWORDS)
    }

    pub fn max_topics(&self) -> usize {
        self.max_topics.unwrap_or(super::DEFAULT_MAX_TOPICS)
    }
}

/// The only way extraction itself can fail.
///
/// Everything else — all-stopword input, pure punctuation, a single
/// character — produces a valid (possibly empty) result. Callers use this
/// classification to distinguish "nothing to do" from an internal bug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("nothing to extract: both title and body are empty")]
    EmptyInput,
}
