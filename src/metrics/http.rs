// HTTP keyword-metrics client.
//
// Talks to whatever difficulty service QUARRY_METRICS_URL points at. The
// wire contract is a single POST: {"keywords": [...]} in,
// {"difficulties": {"keyword": number-or-null, ...}} out. The reqwest
// client carries its own timeout and the pipeline wraps the call in a
// second tokio timeout, so a stalled service can never hold up extraction.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::DifficultyMap;

use super::traits::DifficultyProvider;

/// Difficulty lookups against an HTTP metrics service.
pub struct HttpDifficultyProvider {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpDifficultyProvider {
    /// Create a client for the given service URL. The timeout applies to
    /// the whole request including connect time.
    pub fn new(url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build metrics HTTP client")?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl DifficultyProvider for HttpDifficultyProvider {
    async fn lookup(&self, keywords: &[String]) -> Result<DifficultyMap> {
        let request = DifficultyRequest {
            keywords: keywords.to_vec(),
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .context("Failed to call keyword-metrics service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Keyword-metrics service returned {status}: {body}");
        }

        let result: DifficultyResponse = response
            .json()
            .await
            .context("Failed to parse keyword-metrics response")?;

        debug!(
            requested = keywords.len(),
            returned = result.difficulties.len(),
            "Fetched keyword difficulties"
        );

        Ok(result.difficulties.into_iter().collect())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

// --- Wire types ---

#[derive(Serialize)]
struct DifficultyRequest {
    keywords: Vec<String>,
}

#[derive(Deserialize)]
struct DifficultyResponse {
    difficulties: HashMap<String, Option<f64>>,
}
