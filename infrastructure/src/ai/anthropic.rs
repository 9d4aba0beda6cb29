//! Anthropic Messages API provider

use super::http::{create_http_client, post_json};
use async_trait::async_trait;
use lintmux_application::{AiProvider, AiRequest, AiResponse};
use lintmux_domain::{AiError, estimate_cost};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const NAME: &str = "anthropic";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>, timeout: Duration) -> Result<Self, AiError> {
        Ok(Self {
            client: create_http_client(NAME, timeout)?,
            api_key: api_key.into(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            base_url: API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(&self, request: &AiRequest) -> serde_json::Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "messages": [{"role": "user", "content": request.prompt}],
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }
        body
    }

    fn parse_response(&self, text: &str) -> Result<AiResponse, AiError> {
        let parsed: MessagesResponse = serde_json::from_str(text)
            .map_err(|e| AiError::InvalidResponse(format!("{NAME}: {e}")))?;
        let content = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        let model = parsed.model.unwrap_or_else(|| self.model.clone());
        let (input, output) = (parsed.usage.input_tokens, parsed.usage.output_tokens);
        Ok(AiResponse {
            content,
            cost_estimate: estimate_cost(&model, input, output),
            model,
            input_tokens: input,
            output_tokens: output,
            provider: NAME.to_string(),
        })
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn complete(&self, request: &AiRequest) -> Result<AiResponse, AiError> {
        if !self.is_available() {
            return Err(AiError::NotAvailable {
                provider: NAME.to_string(),
                reason: format!("{DEFAULT_API_KEY_ENV} is not set"),
            });
        }
        tracing::debug!(model = %self.model, max_tokens = request.max_tokens, "Anthropic request");
        let builder = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION);
        let text = post_json(NAME, builder, &self.request_body(request)).await?;
        self.parse_response(&text)
    }
}
