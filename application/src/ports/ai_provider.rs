//! AI provider port
//!
//! Defines the interface for single-shot completions against an AI
//! provider. HTTP adapters live in the infrastructure layer.

use async_trait::async_trait;
use lintmux_domain::AiError;
use serde::{Deserialize, Serialize};

/// A completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub prompt: String,
    pub system: Option<String>,
    pub max_tokens: u32,
}

impl AiRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A completion response with usage accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_estimate: f64,
    pub provider: String,
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name (e.g. "anthropic")
    fn name(&self) -> &str;

    /// Model used for completions
    fn model(&self) -> &str;

    /// Whether credentials are present
    fn is_available(&self) -> bool;

    async fn complete(&self, request: &AiRequest) -> Result<AiResponse, AiError>;
}
