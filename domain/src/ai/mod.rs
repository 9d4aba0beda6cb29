//! AI-assist domain types
//!
//! Provider-independent pieces of the optional AI layer: the error taxonomy
//! that drives retries, the retry policy itself, cost estimation, prompt
//! templates and the parsers for summary and fix responses.
//!
//! | Error | Recoverable? |
//! |-------|--------------|
//! | `RateLimit` | Yes |
//! | `Provider` | Yes |
//! | `Authentication` | No |
//! | `NotAvailable`, `TokenLimit`, `InvalidResponse`, `Configuration` | No |

pub mod cost;
pub mod error;
pub mod fix;
pub mod prompts;
pub mod retry;
pub mod summary;

/// Strip a surrounding markdown code fence, if any.
///
/// Models are told not to fence JSON but sometimes do anyway.
pub(crate) fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}
