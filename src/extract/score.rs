// N-gram frequency scoring.
//
// Unigrams and bigrams share one score namespace: a bigram occurrence is
// worth two unigram occurrences, and terms appearing in the title get a
// single 1.5x multiplier after counting. The table tracks first-seen order
// so ranking can break score ties deterministically regardless of HashMap
// iteration order.

use std::collections::{HashMap, HashSet};

/// Score contribution of one unigram occurrence.
pub const UNIGRAM_WEIGHT: f64 = 1.0;
/// Score contribution of one bigram occurrence.
pub const BIGRAM_WEIGHT: f64 = 2.0;
/// Multiplier for unigrams that also appear in the title. Applied once,
/// after all frequency counting, not per occurrence.
pub const TITLE_BOOST: f64 = 1.5;

/// Accumulated term scores with first-seen ordering.
#[derive(Debug, Default)]
pub struct ScoreTable {
    scores: HashMap<String, f64>,
    first_seen: HashMap<String, usize>,
}

impl ScoreTable {
    fn bump(&mut self, term: String, weight: f64) {
        let next = self.first_seen.len();
        self.first_seen.entry(term.clone()).or_insert(next);
        *self.scores.entry(term).or_insert(0.0) += weight;
    }

    /// Multiply unigram entries that appear in the title token set.
    ///
    /// Bigram keys are space-joined pairs and the title set holds single
    /// tokens, so the membership check can only ever hit unigrams.
    pub fn apply_title_boost(&mut self, title_tokens: &HashSet<String>) {
        for (term, score) in self.scores.iter_mut() {
            if title_tokens.contains(term) {
                *score *= TITLE_BOOST;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Drain into (term, score, first_seen) triples for ranking.
    pub fn into_entries(mut self) -> Vec<(String, f64, usize)> {
        self.scores
            .drain()
            .map(|(term, score)| {
                let seen = self.first_seen[&term];
                (term, score, seen)
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn score_of(&self, term: &str) -> f64 {
        self.scores[term]
    }
}

/// Count unigram and bigram occurrences over the filtered token stream.
pub fn score_terms(tokens: &[String]) -> ScoreTable {
    let mut table = ScoreTable::default();

    for token in tokens {
        table.bump(token.clone(), UNIGRAM_WEIGHT);
    }

    for pair in tokens.windows(2) {
        table.bump(format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT);
    }

    table
}
