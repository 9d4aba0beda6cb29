//! Summarize use case
//!
//! Asks an AI provider for a triage summary of a report's digest.

use crate::ports::ai_provider::{AiProvider, AiRequest};
use crate::ports::sleeper::Sleeper;
use crate::retry::with_retry;
use lintmux_domain::ai::prompts::{SUMMARY_SYSTEM, summary_prompt};
use lintmux_domain::ai::summary::parse_summary_response;
use lintmux_domain::{AiError, AiSummary, IssueDigest, RetryPolicy};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 2048;

pub struct SummarizeUseCase {
    provider: Arc<dyn AiProvider>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    max_tokens: u32,
}

impl SummarizeUseCase {
    pub fn new(provider: Arc<dyn AiProvider>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            provider,
            sleeper,
            policy: RetryPolicy::default(),
            max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Summarize `digest`; `Ok(None)` when there is nothing to summarize.
    pub async fn execute(&self, digest: &IssueDigest) -> Result<Option<AiSummary>, AiError> {
        if digest.is_empty() {
            return Ok(None);
        }

        let request = AiRequest::new(summary_prompt(digest), self.max_tokens).with_system(SUMMARY_SYSTEM);
        let provider = self.provider.as_ref();
        let response = with_retry(&self.policy, self.sleeper.as_ref(), || provider.complete(&request)).await?;

        info!(
            provider = %response.provider,
            model = %response.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "AI summary received"
        );
        let summary = parse_summary_response(&response.content).with_usage(
            response.input_tokens,
            response.output_tokens,
            response.cost_estimate,
        );
        Ok(Some(summary))
    }
}
