// Difficulty provider trait — the swap-ready abstraction.
//
// This trait defines the interface for keyword difficulty lookups. The
// default implementation calls an HTTP metrics service; a file-backed
// implementation exists for offline use and tests. Enrichment is always
// best-effort, so implementations report failures as errors and the
// pipeline decides to proceed without them.

use anyhow::Result;
use async_trait::async_trait;

use crate::extract::DifficultyMap;

/// Trait for looking up per-keyword ranking difficulty. Implementations
/// are async because the primary provider is an HTTP API call.
#[async_trait]
pub trait DifficultyProvider: Send + Sync {
    /// Fetch difficulty data for the given keywords.
    ///
    /// The returned map may cover any subset of the request — keywords the
    /// provider knows nothing about are simply absent.
    async fn lookup(&self, keywords: &[String]) -> Result<DifficultyMap>;

    /// Short human-readable name for log lines.
    fn name(&self) -> &'static str;
}
