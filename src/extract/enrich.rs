// Difficulty enrichment — post-hoc score adjustment from external data.
//
// The keyword-metrics service reports how hard a keyword is to rank for
// (0 = easy, 100 = saturated). Easy keywords get a boost of up to 15% so
// they float toward the top of an otherwise frequency-driven ranking.
// Enrichment only rescales scores that already exist; it never adds or
// removes keywords and never reorders the list.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::rank::round2;
use super::types::ScoredKeyword;

/// Largest relative boost, reached at difficulty 0.
pub const MAX_DIFFICULTY_BOOST: f64 = 0.15;

/// Per-keyword ranking difficulty, keyed case-insensitively.
///
/// A null entry means the metrics service had no data for that keyword and
/// behaves the same as an absent one.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DifficultyMap {
    entries: HashMap<String, Option<f64>>,
}

impl DifficultyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keyword: impl Into<String>, difficulty: Option<f64>) {
        self.entries.insert(keyword.into().to_lowercase(), difficulty);
    }

    /// Look up a keyword's difficulty, treating null entries as absent.
    pub fn get(&self, keyword: &str) -> Option<f64> {
        match self.entries.get(keyword) {
            Some(value) => *value,
            None => self.entries.get(&keyword.to_lowercase()).copied().flatten(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, Option<f64>)> for DifficultyMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (keyword, difficulty) in iter {
            map.insert(keyword, difficulty);
        }
        map
    }
}

// Manual Deserialize so keys are lowercased on the way in — the case fold
// must hold even for maps loaded straight from JSON.
impl<'de> Deserialize<'de> for DifficultyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Option<f64>>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Rescale keyword scores using the difficulty map.
///
/// Difficulty 0 yields a 15% boost; difficulty 100 leaves the score
/// untouched. Keywords absent from the map (or present as null) are left
/// unchanged.
pub fn enrich(keywords: &mut [ScoredKeyword], difficulty: &DifficultyMap) {
    for kw in keywords.iter_mut() {
        if let Some(d) = difficulty.get(&kw.keyword) {
            let boost = 1.0 + (1.0 - d.min(100.0) / 100.0) * MAX_DIFFICULTY_BOOST;
            kw.score = round2(kw.score * boost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::types::KeywordSource;

    fn keyword(term: &str, score: f64) -> ScoredKeyword {
        ScoredKeyword {
            keyword: term.to_string(),
            score,
            source: KeywordSource::Body,
        }
    }

    #[test]
    fn zero_difficulty_boosts_fifteen_percent() {
        let mut kws = vec![keyword("seo", 0.8)];
        let mut map = DifficultyMap::new();
        map.insert("seo", Some(0.0));
        enrich(&mut kws, &map);
        assert_eq!(kws[0].score, 0.92);
    }

    #[test]
    fn max_difficulty_leaves_score_unchanged() {
        let mut kws = vec![keyword("seo", 0.8)];
        let mut map = DifficultyMap::new();
        map.insert("seo", Some(100.0));
        enrich(&mut kws, &map);
        assert_eq!(kws[0].score, 0.8);
    }

    #[test]
    fn out_of_range_difficulty_is_capped() {
        let mut kws = vec![keyword("seo", 0.8)];
        let mut map = DifficultyMap::new();
        map.insert("seo", Some(250.0));
        enrich(&mut kws, &map);
        assert_eq!(kws[0].score, 0.8);
    }

    #[test]
    fn absent_and_null_entries_unchanged() {
        let mut kws = vec![keyword("alpha", 0.5), keyword("beta", 0.5)];
        let mut map = DifficultyMap::new();
        map.insert("beta", None);
        enrich(&mut kws, &map);
        assert_eq!(kws[0].score, 0.5);
        assert_eq!(kws[1].score, 0.5);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut map = DifficultyMap::new();
        map.insert("SEO", Some(10.0));
        assert_eq!(map.get("seo"), Some(10.0));
        assert_eq!(map.get("SEO"), Some(10.0));
    }

    #[test]
    fn deserialized_maps_fold_case() {
        let map: DifficultyMap =
            serde_json::from_str(r#"{"Rust Async": 40.0, "b": null}"#).unwrap();
        assert_eq!(map.get("rust async"), Some(40.0));
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn never_adds_or_removes_keywords() {
        let mut kws = vec![keyword("alpha", 0.5)];
        let mut map = DifficultyMap::new();
        map.insert("unrelated", Some(0.0));
        enrich(&mut kws, &map);
        assert_eq!(kws.len(), 1);
        assert_eq!(kws[0].keyword, "alpha");
    }
}
