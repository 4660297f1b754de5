// Topic recommendation — templated suggestions from the top keywords.

use super::types::{RecommendedTopic, ScoredKeyword};

/// Fixed rationale attached to every recommendation.
pub const RECOMMENDATION_REASON: &str = "High relevance based on post content and title";

/// Per-rank linear decay applied to the inherited keyword score.
const RANK_DECAY: f64 = 0.05;

const TOPIC_SUFFIX: &str = ": A Practical Guide";

/// Derive topic suggestions 1:1 from the top ranked keywords.
///
/// The decayed score is left unrounded beyond the keyword's own two-decimal
/// rounding. An empty keyword list yields an empty topic list.
pub fn recommend(keywords: &[ScoredKeyword], max_topics: usize) -> Vec<RecommendedTopic> {
    keywords
        .iter()
        .take(max_topics)
        .enumerate()
        .map(|(i, kw)| RecommendedTopic {
            topic: format!("{}{}", capitalize_first(&kw.keyword), TOPIC_SUFFIX),
            score: kw.score * (1.0 - i as f64 * RANK_DECAY),
            reason: RECOMMENDATION_REASON.to_string(),
        })
        .collect()
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize_first(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
