//! AI configuration from TOML (`[ai]` section)
//!
//! ```toml
//! [ai]
//! enabled = true
//! provider = "anthropic"
//! model = "claude-sonnet-4-20250514"
//! max_retries = 3
//! ```

use lintmux_domain::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Providers with a built-in HTTP client
pub const KNOWN_PROVIDERS: &[&str] = &["anthropic", "openai"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAiConfig {
    /// Run the summary after every check, without `--ai-summary`
    pub enabled: bool,
    pub provider: String,
    /// Provider default when unset
    pub model: Option<String>,
    /// Overrides the provider's standard key variable
    pub api_key_env: Option<String>,
    pub max_tokens: u32,
    pub max_fix_issues: usize,
    pub max_retries: u32,
    pub base_delay_secs: f64,
    pub backoff_factor: f64,
    pub max_delay_secs: f64,
    /// Per-request HTTP timeout
    pub timeout_secs: u64,
}

impl Default for FileAiConfig {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            enabled: false,
            provider: "anthropic".to_string(),
            model: None,
            api_key_env: None,
            max_tokens: 2048,
            max_fix_issues: 5,
            max_retries: retry.max_retries,
            base_delay_secs: retry.base_delay.as_secs_f64(),
            backoff_factor: retry.backoff_factor,
            max_delay_secs: retry.max_delay.as_secs_f64(),
            timeout_secs: 60,
        }
    }
}

impl FileAiConfig {
    /// Retry policy from the configured numbers; negative or non-finite
    /// delays fall back to the defaults
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        let secs = |value: f64, fallback: Duration| {
            Duration::try_from_secs_f64(value).unwrap_or(fallback)
        };
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_base_delay(secs(self.base_delay_secs, defaults.base_delay))
            .with_max_delay(secs(self.max_delay_secs, defaults.max_delay))
            .with_backoff_factor(if self.backoff_factor.is_finite() && self.backoff_factor >= 1.0 {
                self.backoff_factor
            } else {
                defaults.backoff_factor
            })
    }

    pub fn provider_name(&self) -> String {
        self.provider.trim().to_ascii_lowercase()
    }

    pub fn is_known_provider(&self) -> bool {
        KNOWN_PROVIDERS.contains(&self.provider_name().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_from_config() {
        let config = FileAiConfig {
            max_retries: 5,
            base_delay_secs: 0.5,
            max_delay_secs: 4.0,
            ..Default::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.delay_for(10), Duration::from_secs(4));
    }

    #[test]
    fn test_invalid_delays_fall_back() {
        let config = FileAiConfig {
            base_delay_secs: -1.0,
            backoff_factor: 0.0,
            ..Default::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.base_delay, RetryPolicy::default().base_delay);
        assert_eq!(policy.backoff_factor, RetryPolicy::default().backoff_factor);
    }

    #[test]
    fn test_provider_name_normalized() {
        let config = FileAiConfig {
            provider: " OpenAI ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.provider_name(), "openai");
        assert!(config.is_known_provider());
    }
}
