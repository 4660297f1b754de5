// File-backed difficulty provider.
//
// Loads a JSON object mapping keyword -> difficulty (or null) from disk,
// e.g. {"rust": 72, "rust tooling": 35, "obscure term": null}. Useful for
// offline runs and for pinning enrichment in tests.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::extract::DifficultyMap;

use super::traits::DifficultyProvider;

/// Difficulty data loaded once from a local JSON file.
pub struct FileDifficultyProvider {
    map: DifficultyMap,
}

impl FileDifficultyProvider {
    /// Load the map eagerly so a malformed file fails at startup, not
    /// mid-pipeline.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read difficulty file {}", path.display()))?;
        let map: DifficultyMap = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid difficulty JSON in {}", path.display()))?;
        Ok(Self { map })
    }

    pub fn from_map(map: DifficultyMap) -> Self {
        Self { map }
    }
}

#[async_trait]
impl DifficultyProvider for FileDifficultyProvider {
    async fn lookup(&self, _keywords: &[String]) -> Result<DifficultyMap> {
        // The whole file is the universe of known keywords; extraction
        // only consults the entries it needs.
        Ok(self.map.clone())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
