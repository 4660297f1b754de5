// Tokenization and stopword filtering.
//
// The stopword list is deliberately a single closed constant. The drift
// this crate exists to eliminate was several slightly different copies of
// this list living in duplicated implementations — every consumer now goes
// through this one.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::normalize::normalize;

/// The canonical English stopword list. Closed — additions change scoring
/// for every caller, so treat edits as a behavior change.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "a", "an", "in", "on", "for", "with", "to", "of", "is", "are", "was", "were",
    "it", "this", "that", "by", "from", "as", "at", "or", "be", "we", "you", "your", "our",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Split normalized text into scoring terms.
///
/// Drops empty tokens, stopwords, and single-character tokens. Document
/// order and duplicates are preserved — frequency matters downstream.
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split(' ')
        .filter(|token| !token.is_empty())
        .filter(|token| !STOPWORD_SET.contains(token))
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// The set of scoring terms appearing in the title, used for the title
/// boost and for keyword source attribution.
pub fn title_token_set(title: &str) -> HashSet<String> {
    tokenize(&normalize(title)).into_iter().collect()
}
