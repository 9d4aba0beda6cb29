//! Shared HTTP plumbing for AI providers

use lintmux_domain::AiError;
use lintmux_domain::core::text::truncate;
use std::time::Duration;

/// Longest slice of an error body kept in messages
const MAX_ERROR_BODY: usize = 300;

pub(crate) fn create_http_client(provider: &str, timeout: Duration) -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AiError::Configuration(format!("Failed to create HTTP client for {provider}: {e}")))
}

/// Map a non-success HTTP status to the AI error taxonomy
pub(crate) fn classify_status(provider: &str, status: u16, body: &str) -> AiError {
    let detail = truncate(body.trim(), MAX_ERROR_BODY);
    match status {
        401 | 403 => AiError::authentication(provider, format!("HTTP {status}: {detail}")),
        429 => AiError::rate_limit(provider, detail),
        _ => AiError::provider(provider, format!("HTTP {status}: {detail}")),
    }
}

/// Transport failures are provider failures, so they are retried
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::provider(provider, "request timed out")
    } else {
        AiError::provider(provider, err.to_string())
    }
}

/// POST `body` as JSON and return the response text of a 2xx reply
pub(crate) async fn post_json(
    provider: &str,
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> Result<String, AiError> {
    let response = request
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;

    let status = response.status();
    let text = response.text().await.map_err(|e| transport_error(provider, e))?;
    if !status.is_success() {
        return Err(classify_status(provider, status.as_u16(), &text));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status("anthropic", 401, "bad key"),
            AiError::Authentication { .. }
        ));
        assert!(matches!(
            classify_status("openai", 403, ""),
            AiError::Authentication { .. }
        ));
        let limited = classify_status("openai", 429, "slow down");
        assert!(matches!(limited, AiError::RateLimit { .. }));
        assert!(limited.is_recoverable());
        let server = classify_status("anthropic", 529, "overloaded");
        assert!(matches!(server, AiError::Provider { .. }));
        assert!(server.is_recoverable());
    }
}
