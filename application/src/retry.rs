//! Bounded retry for AI provider calls
//!
//! [`with_retry`] wraps one provider call. Recoverable errors (rate limits,
//! provider failures) are retried with exponential backoff; everything else
//! propagates after the first call.
//!
//! ```text
//! attempt 1 ──err──▶ sleep(base) ──▶ attempt 2 ──err──▶ sleep(base·f) ──▶ ...
//!     │                                   │
//!     ok ──▶ return                       ok ──▶ return
//! ```

use crate::ports::sleeper::Sleeper;
use lintmux_domain::{AiError, RetryPolicy};
use std::future::Future;
use tracing::{debug, warn};

/// Run `op` under `policy`.
///
/// `op` is called at most `policy.max_retries + 1` times. The sleeper is
/// awaited between attempts with `policy.delay_for(retry)`.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: F,
) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "AI call succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_recoverable() && attempt <= policy.max_retries => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "AI call failed, retrying"
                );
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_recoverable() {
                    warn!(attempts = attempt, error = %e, "AI call failed, retries exhausted");
                }
                return Err(e);
            }
        }
    }
}
