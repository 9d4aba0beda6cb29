//! AI provider adapters
//!
//! HTTP clients for the [`AiProvider`] port, compiled with the `ai` feature.
//! Without it, [`create_provider`] reports every provider as unavailable.

#[cfg(feature = "ai")]
pub mod anthropic;
#[cfg(feature = "ai")]
mod http;
#[cfg(feature = "ai")]
pub mod openai;

use crate::availability::key_var;
use crate::config::FileAiConfig;
use lintmux_application::AiProvider;
use lintmux_domain::AiError;
use std::sync::Arc;

/// Environment variable holding the API key for `config`
pub fn api_key_var(config: &FileAiConfig) -> Option<String> {
    config
        .api_key_env
        .clone()
        .or_else(|| key_var(&config.provider_name()).map(String::from))
}

/// Build the provider named in `config`, reading its key through `lookup`.
pub fn create_provider(
    config: &FileAiConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn AiProvider>, AiError> {
    let provider = config.provider_name();
    let var = api_key_var(config).ok_or_else(|| AiError::NotAvailable {
        provider: provider.clone(),
        reason: "unknown provider".to_string(),
    })?;
    let key = lookup(&var)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| AiError::NotAvailable {
            provider: provider.clone(),
            reason: format!("{var} is not set"),
        })?;
    build(&provider, key, config)
}

#[cfg(feature = "ai")]
fn build(provider: &str, key: String, config: &FileAiConfig) -> Result<Arc<dyn AiProvider>, AiError> {
    let timeout = std::time::Duration::from_secs(config.timeout_secs.max(1));
    let model = config.model.as_deref();
    match provider {
        "anthropic" => Ok(Arc::new(anthropic::AnthropicProvider::new(key, model, timeout)?)),
        "openai" => Ok(Arc::new(openai::OpenAiProvider::new(key, model, timeout)?)),
        other => Err(AiError::NotAvailable {
            provider: other.to_string(),
            reason: "unknown provider".to_string(),
        }),
    }
}

#[cfg(not(feature = "ai"))]
fn build(provider: &str, _key: String, _config: &FileAiConfig) -> Result<Arc<dyn AiProvider>, AiError> {
    Err(AiError::NotAvailable {
        provider: provider.to_string(),
        reason: "lintmux was built without the 'ai' feature".to_string(),
    })
}
