pub mod snippet;
pub mod types;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use types::{SearchRecord, SearchResponse};

/// Full-text search over the subject's document index.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchRecord>>;
}

/// Azure AI Search REST client for a single index.
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    index: String,
    api_key: String,
    api_version: String,
}

impl SearchClient {
    pub fn from_env() -> Result<Self> {
        let endpoint = dotenv::var("SEARCH_ENDPOINT").context("SEARCH_ENDPOINT required")?;
        let api_key = dotenv::var("SEARCH_API_KEY").context("SEARCH_API_KEY required")?;
        let index = dotenv::var("INDEX_NAME").context("INDEX_NAME required")?;
        let api_version =
            dotenv::var("SEARCH_API_VERSION").unwrap_or_else(|_| "2023-11-01".to_string());

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            index,
            api_key,
            api_version,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.index,
            self.api_version
        )
    }

    pub fn index(&self) -> &str {
        &self.index
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search(&self, query: &str, top: usize) -> Result<Vec<SearchRecord>> {
        let body = serde_json::json!({
            "search": query,
            "top": top,
        });

        let resp = self
            .client
            .post(self.endpoint())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Search request failed")?
            .error_for_status()
            .context("Search service returned an error status")?;

        let parsed: SearchResponse = resp
            .json()
            .await
            .context("Failed to parse search response")?;

        debug!(query, top, hits = parsed.value.len(), "search complete");
        Ok(parsed.value)
    }
}
