use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::prompts::build_summary_prompt;
use super::{SummaryRequest, Summarizer};
use crate::config::AnthropicConfig;

pub const DEFAULT_ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-5-20250929";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl ClaudeClient {
    pub fn new(config: &AnthropicConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build Anthropic HTTP client")?;

        info!(
            "Initialized Claude summarizer with model {} (max_tokens {})",
            config.model, config.max_tokens
        );

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            endpoint: config.endpoint.clone(),
        })
    }

    fn build_request(&self, request: &SummaryRequest<'_>) -> ClaudeRequest {
        ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user",
                content: build_summary_prompt(
                    request.title,
                    request.participants,
                    request.transcript,
                ),
            }],
        }
    }
}

fn extract_text(response: ClaudeResponse) -> Result<String> {
    if response.stop_reason.as_deref() == Some("max_tokens") {
        debug!("Claude stopped at max_tokens; summary may be truncated");
    }

    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text)
        .ok_or_else(|| anyhow!("Claude response did not contain summary text"))
}

#[async_trait]
impl Summarizer for ClaudeClient {
    fn name(&self) -> &'static str {
        "Claude"
    }

    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<String> {
        let body = self.build_request(&request);

        debug!(
            "Requesting summary for '{}' ({} transcript chars)",
            request.title,
            request.transcript.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Anthropic")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Anthropic response body")?;

        if !status.is_success() {
            error!(%status, body = %response_text, "Claude API error");

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                return Err(anyhow!(
                    "Claude API error ({}): {}",
                    error_response.error.kind,
                    error_response.error.message
                ));
            }

            return Err(anyhow!("Claude API error {}: {}", status, response_text));
        }

        let parsed: ClaudeResponse =
            serde_json::from_str(&response_text).context("Failed to parse Claude response")?;

        let summary = extract_text(parsed)?;
        info!("Generated summary: {} chars", summary.len());
        Ok(summary)
    }
}
