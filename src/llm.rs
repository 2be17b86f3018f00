use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion capability used by the response generator.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the content of the first completion choice.
    async fn complete(&self, messages: &[Message], model: &str, temperature: f32)
        -> Result<String>;
}

/// Azure OpenAI chat completions client.
pub struct LlmClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

impl LlmClient {
    pub fn from_env() -> Result<Self> {
        let endpoint = dotenv::var("OPENAI_ENDPOINT").context("OPENAI_ENDPOINT required")?;
        let api_key = dotenv::var("OPENAI_KEY").context("OPENAI_KEY required")?;
        let deployment = dotenv::var("DEPLOYMENT_NAME").context("DEPLOYMENT_NAME required")?;
        let api_version = dotenv::var("OPENAI_API_VERSION")
            .unwrap_or_else(|_| "2025-01-01-preview".to_string());

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            api_version,
            deployment,
        })
    }

    /// Deployment name doubles as the model identifier on Azure.
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    /// Resolve the chat completions URL for a deployment.
    fn endpoint(&self, deployment: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            base, deployment, self.api_version
        )
    }

    /// Non-streaming chat completion.
    pub async fn chat(
        &self,
        messages: &[Message],
        deployment: &str,
        temperature: f32,
    ) -> Result<String> {
        let body = serde_json::json!({
            "messages": messages,
            "temperature": temperature,
        });

        let resp = self
            .client
            .post(self.endpoint(deployment))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("LLM request failed")?
            .error_for_status()
            .context("LLM service returned an error status")?;
        let text = resp.text().await.context("Failed to read LLM response")?;

        extract_content(&text)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
    ) -> Result<String> {
        self.chat(messages, model, temperature).await
    }
}

/// Pull `choices[0].message.content` out of a completion body.
fn extract_content(body: &str) -> Result<String> {
    let json: serde_json::Value =
        serde_json::from_str(body).context("Failed to parse LLM JSON")?;

    json["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("LLM response has no message content"))
}
