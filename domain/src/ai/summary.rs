//! AI summary of a report

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::strip_code_fence;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    pub overview: String,
    #[serde(default)]
    pub key_patterns: Vec<String>,
    #[serde(default)]
    pub priority_actions: Vec<String>,
    #[serde(default)]
    pub triage_suggestions: Vec<String>,
    #[serde(default)]
    pub estimated_effort: String,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cost_estimate: f64,
}

#[derive(Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    overview: String,
    #[serde(default)]
    key_patterns: Vec<String>,
    #[serde(default)]
    priority_actions: Vec<String>,
    #[serde(default)]
    triage_suggestions: Vec<String>,
    #[serde(default)]
    estimated_effort: String,
}

impl AiSummary {
    pub fn with_usage(mut self, input_tokens: u64, output_tokens: u64, cost_estimate: f64) -> Self {
        self.input_tokens = input_tokens;
        self.output_tokens = output_tokens;
        self.cost_estimate = cost_estimate;
        self
    }
}

/// Parse the model's JSON summary.
///
/// A response that is not the expected JSON is kept verbatim as the
/// overview so nothing the model said is lost.
pub fn parse_summary_response(content: &str) -> AiSummary {
    match serde_json::from_str::<SummaryPayload>(strip_code_fence(content)) {
        Ok(payload) => AiSummary {
            overview: payload.overview,
            key_patterns: payload.key_patterns,
            priority_actions: payload.priority_actions,
            triage_suggestions: payload.triage_suggestions,
            estimated_effort: payload.estimated_effort,
            ..AiSummary::default()
        },
        Err(e) => {
            debug!("Summary response is not JSON, using raw text: {}", e);
            AiSummary {
                overview: content.trim().to_string(),
                ..AiSummary::default()
            }
        }
    }
}
