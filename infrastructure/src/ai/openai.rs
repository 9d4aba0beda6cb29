//! OpenAI Chat Completions provider

use super::http::{create_http_client, post_json};
use async_trait::async_trait;
use lintmux_application::{AiProvider, AiRequest, AiResponse};
use lintmux_domain::{AiError, estimate_cost};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const NAME: &str = "openai";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>, timeout: Duration) -> Result<Self, AiError> {
        Ok(Self {
            client: create_http_client(NAME, timeout)?,
            api_key: api_key.into(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            base_url: API_URL.to_string(),
        })
    }

    /// Point at an OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(&self, request: &AiRequest) -> serde_json::Value {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));
        json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "messages": messages,
        })
    }

    fn parse_response(&self, text: &str) -> Result<AiResponse, AiError> {
        let parsed: ChatResponse = serde_json::from_str(text)
            .map_err(|e| AiError::InvalidResponse(format!("{NAME}: {e}")))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::InvalidResponse(format!("{NAME}: response has no choices")))?;
        let model = parsed.model.unwrap_or_else(|| self.model.clone());
        let (input, output) = (parsed.usage.prompt_tokens, parsed.usage.completion_tokens);
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
impl AiProvider for OpenAiProvider {
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
        tracing::debug!(model = %self.model, max_tokens = request.max_tokens, "OpenAI request");
        let builder = self.client.post(&self.base_url).bearer_auth(&self.api_key);
        let text = post_json(NAME, builder, &self.request_body(request)).await?;
        self.parse_response(&text)
    }
}
