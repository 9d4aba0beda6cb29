//! Output parsers: one per external tool
//!
//! Every parser has the same shape:
//!
//! ```text
//! parse_<tool>_output(raw: Option<&str>) -> Vec<Issue>
//! ```
//!
//! Parsers are total and pure. They never fail and never touch the
//! filesystem:
//!
//! - `None`, empty or whitespace-only input yields an empty list
//! - an unparseable top-level document yields an empty list and a
//!   `debug!` diagnostic
//! - malformed entries are skipped one by one; the rest still parse
//! - entries without a usable file reference are discarded
//!
//! Parsers never set [`Issue::tool`]; aggregation attaches it.

use serde_json::Value;
use tracing::debug;

use crate::issue::Issue;

pub mod bandit;
pub mod black;
pub mod cargo_deny;
pub mod clippy;
pub mod gitleaks;
pub mod hadolint;
pub mod markdownlint;
pub mod mypy;
pub mod ruff;
pub mod semgrep;
pub mod shellcheck;
pub mod taplo;
pub mod tsc;
pub mod yamllint;

pub use bandit::parse_bandit_output;
pub use black::parse_black_output;
pub use cargo_deny::parse_cargo_deny_output;
pub use clippy::parse_clippy_output;
pub use gitleaks::parse_gitleaks_output;
pub use hadolint::parse_hadolint_output;
pub use markdownlint::parse_markdownlint_output;
pub use mypy::parse_mypy_output;
pub use ruff::parse_ruff_output;
pub use semgrep::parse_semgrep_output;
pub use shellcheck::parse_shellcheck_output;
pub use taplo::parse_taplo_output;
pub use tsc::parse_tsc_output;
pub use yamllint::parse_yamllint_output;

/// Signature shared by all parsers
pub type ParseFn = fn(Option<&str>) -> Vec<Issue>;

/// Look up the parser for a tool name
pub fn parser_for(tool: &str) -> Option<ParseFn> {
    let parser: ParseFn = match tool {
        "bandit" => parse_bandit_output,
        "black" => parse_black_output,
        "cargo-deny" => parse_cargo_deny_output,
        "clippy" => parse_clippy_output,
        "gitleaks" => parse_gitleaks_output,
        "hadolint" => parse_hadolint_output,
        "markdownlint" => parse_markdownlint_output,
        "mypy" => parse_mypy_output,
        "ruff" => parse_ruff_output,
        "semgrep" => parse_semgrep_output,
        "shellcheck" => parse_shellcheck_output,
        "taplo" => parse_taplo_output,
        "tsc" => parse_tsc_output,
        "yamllint" => parse_yamllint_output,
        _ => return None,
    };
    Some(parser)
}

/// Parse a whole JSON document, logging and returning `None` on failure.
pub(crate) fn parse_json_document(tool: &str, raw: &str) -> Option<Value> {
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("{}: output is not valid JSON: {}", tool, e);
            None
        }
    }
}

/// Parse JSON-lines output. Lines that are not JSON objects are skipped.
pub(crate) fn json_lines<'a>(tool: &'a str, raw: &'a str) -> impl Iterator<Item = Value> + 'a {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .filter_map(move |line| match serde_json::from_str::<Value>(line) {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => None,
            Err(e) => {
                debug!("{}: skipping undecodable line: {}", tool, e);
                None
            }
        })
}

/// First non-empty string among `keys`
pub(crate) fn str_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// First non-negative integer among `keys`; numeric strings are accepted.
pub(crate) fn u32_field(value: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(as_u32)
}

pub(crate) fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalize Windows separators so locations compare equal across hosts
pub(crate) fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/")
}
