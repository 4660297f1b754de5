// Keyword extraction — the scoring core every invocation context shares.
//
// The algorithm is deliberately boring: normalize, tokenize, count
// unigrams and bigrams, boost title terms, rank, and template topic
// suggestions off the winners. It is pure and synchronous — no I/O, no
// shared state — so the CLI, the batch pipeline, and the web wrapper all
// call the same function with no coordination.

pub mod enrich;
pub mod normalize;
pub mod rank;
pub mod recommend;
pub mod score;
pub mod tokenize;
pub mod types;

pub use self::enrich::{enrich, DifficultyMap};
pub use self::types::{
    ExtractError, ExtractOptions, ExtractionResult, KeywordSource, RecommendedTopic, ScoredKeyword,
};

/// Keywords kept after ranking, unless overridden per call.
pub const DEFAULT_MAX_KEYWORDS: usize = 15;
/// Topics derived from the top keywords, unless overridden per call.
pub const DEFAULT_MAX_TOPICS: usize = 6;

/// Upper bound on the raw `title + " " + body` input, in characters,
/// applied before normalization. A safety bound against pathological input
/// size, not a semantic truncation.
pub const MAX_INPUT_CHARS: usize = 20_000;

/// Run the full extraction pipeline over one document.
///
/// Fails only when both title and body are blank after trimming; every
/// other input — single characters, pure punctuation, all stopwords —
/// produces a valid (possibly empty) result.
pub fn extract(
    title: &str,
    body: &str,
    options: &ExtractOptions,
) -> Result<ExtractionResult, ExtractError> {
    if title.trim().is_empty() && body.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    // The bound applies to the raw concatenation, before any markup
    // stripping — an oversized blob of tags is cut as-is.
    let combined: String = format!("{title} {body}")
        .chars()
        .take(MAX_INPUT_CHARS)
        .collect();

    let tokens = tokenize::tokenize(&normalize::normalize(&combined));
    let title_tokens = tokenize::title_token_set(title);

    let mut table = score::score_terms(&tokens);
    table.apply_title_boost(&title_tokens);

    let mut keywords = rank::rank(table, &title_tokens, options.max_keywords());

    if let Some(difficulty) = &options.difficulty {
        enrich::enrich(&mut keywords, difficulty);
    }

    let topics = recommend::recommend(&keywords, options.max_topics());

    Ok(ExtractionResult { keywords, topics })
}
