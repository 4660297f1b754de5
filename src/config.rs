use std::env;
use std::time::Duration;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All settings come from env vars; the .env file is loaded automatically
/// at startup via dotenvy. Everything has a default or is optional — the
/// CLI works out of the box with no configuration at all.
pub struct Config {
    /// SQLite database path (QUARRY_DB_PATH, default ./quarry.db)
    pub db_path: String,
    /// Keyword-metrics service URL (QUARRY_METRICS_URL). When unset,
    /// difficulty enrichment is skipped entirely.
    pub metrics_url: Option<String>,
    /// Bearer token for the metrics service (QUARRY_METRICS_API_KEY)
    pub metrics_api_key: Option<String>,
    /// Upper bound on one difficulty lookup, in milliseconds
    /// (QUARRY_METRICS_TIMEOUT_MS, default 1500)
    pub metrics_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let metrics_timeout_ms = match env::var("QUARRY_METRICS_TIMEOUT_MS") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("QUARRY_METRICS_TIMEOUT_MS must be an integer, got {raw:?}")
            })?,
            Err(_) => 1500,
        };

        Ok(Self {
            db_path: env::var("QUARRY_DB_PATH").unwrap_or_else(|_| "./quarry.db".to_string()),
            metrics_url: env::var("QUARRY_METRICS_URL").ok(),
            metrics_api_key: env::var("QUARRY_METRICS_API_KEY").ok(),
            metrics_timeout_ms,
        })
    }

    /// The difficulty-lookup bound as a Duration.
    pub fn metrics_timeout(&self) -> Duration {
        Duration::from_millis(self.metrics_timeout_ms)
    }
}
