use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::constants; // For the provider URL, key and model

/// Anything that can turn a prompt into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// Structures matching the Anthropic Messages API
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    // Other fields like usage and stop_reason are ignored
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for the Anthropic Messages endpoint.
///
/// One request per call, no retries, and reqwest's default timeouts.
pub struct AnthropicGenerator {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl AnthropicGenerator {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            client: Client::new(),
            url: format!("{}/v1/messages", base.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Built from `ANTHROPIC_API_URL`, `ANTHROPIC_API_KEY` and `NAME_FINDER_MODEL`.
    pub fn from_env() -> Self {
        Self::new(
            constants::ANTHROPIC_API_URL.as_str(),
            constants::ANTHROPIC_API_KEY.as_str(),
            constants::NAME_FINDER_MODEL.as_str(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            bail!("ANTHROPIC_API_KEY is not set");
        }

        debug!(?prompt, "Sending prompt to Anthropic");

        let request_payload = MessagesRequest {
            model: &self.model,
            max_tokens: constants::MAX_TOKENS,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", constants::ANTHROPIC_API_VERSION)
            .json(&request_payload)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Anthropic API at {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(%status, %error_body, "Anthropic API request failed");
            bail!("Anthropic API request failed with status {}: {}", status, error_body);
        }

        let messages_response = response
            .json::<MessagesResponse>()
            .await
            .context("Failed to parse JSON response from Anthropic API")?;

        let text = messages_response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        debug!(response = ?text, "Received Anthropic response");

        Ok(text)
    }
}
