// Ranking and score normalization.
//
// The raw frequency scores are unbounded; after sorting and truncation the
// kept entries are rescaled against the top score so the winner is exactly
// 1.0 and everything else is a fraction of it.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::score::ScoreTable;
use super::types::{KeywordSource, ScoredKeyword};

/// Round to two decimal places — the precision every published score uses.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sort, truncate, and rescale the score table into ranked keywords.
///
/// Ties are broken by first-seen order, which keeps output deterministic
/// for identical input. Source attribution checks the verbatim keyword
/// string against the title token set, so bigrams always come out as
/// body-sourced.
pub fn rank(
    table: ScoreTable,
    title_tokens: &HashSet<String>,
    max_keywords: usize,
) -> Vec<ScoredKeyword> {
    let mut entries = table.into_entries();

    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2))
    });
    entries.truncate(max_keywords);

    // Guard against divide-by-zero on an empty list
    let max_score = entries.first().map(|(_, score, _)| *score).unwrap_or(1.0);

    entries
        .into_iter()
        .map(|(term, score, _)| {
            let source = if title_tokens.contains(&term) {
                KeywordSource::Title
            } else {
                KeywordSource::Body
            };
            ScoredKeyword {
                score: round2(score / max_score),
                source,
                keyword: term,
            }
        })
        .collect()
}
