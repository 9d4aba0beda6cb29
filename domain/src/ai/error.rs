//! AI error taxonomy

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("AI provider '{provider}' is not available: {reason}")]
    NotAvailable { provider: String, reason: String },

    #[error("Authentication failed for {provider}: {message}")]
    Authentication { provider: String, message: String },

    #[error("Rate limited by {provider}: {message}")]
    RateLimit { provider: String, message: String },

    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },

    #[error("Token limit exceeded: {0}")]
    TokenLimit(String),

    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),

    #[error("AI configuration error: {0}")]
    Configuration(String),
}

impl AiError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AiError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn rate_limit(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AiError::RateLimit {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn authentication(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AiError::Authentication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Transient provider failures worth retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AiError::RateLimit { .. } | AiError::Provider { .. })
    }

    /// Errors raised by a provider call (authentication, rate limit, other)
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            AiError::Authentication { .. } | AiError::RateLimit { .. } | AiError::Provider { .. }
        )
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, AiError::Authentication { .. })
    }
}
