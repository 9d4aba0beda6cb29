//! markdownlint-cli2 (default formatter)

use regex::Regex;
use std::sync::LazyLock;

use crate::core::text::{non_blank, strip_ansi_codes};
use crate::issue::{Issue, Severity};

/// `file:line[:col] [error] MD###[/rule-name][:] message [Context: ...]`
///
/// Newer releases print `error` between the location and the rule, older
/// ones do not; both are accepted.
static ISSUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([^:]+):(\d+)(?::(\d+))?\s+(?:error\s+)?(MD\d+)(?:/[^:\s]+)?(?::\s*)?\s*(.+?)(?:\s+\[(?:Context|Expected|Actual):.*?\])?$",
    )
    .expect("valid markdownlint regex")
});

const METADATA_PREFIXES: &[&str] = &["markdownlint-cli2", "Finding:", "Linting:", "Summary:"];

pub fn parse_markdownlint_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };

    strip_ansi_codes(raw)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !METADATA_PREFIXES.iter().any(|p| line.starts_with(p)))
        .filter_map(|line| {
            let caps = ISSUE_LINE.captures(line)?;
            let line_no: u32 = caps[2].parse().ok()?;
            let column = caps
                .get(3)
                .and_then(|c| c.as_str().parse::<u32>().ok())
                .unwrap_or(0);
            Some(
                Issue::new(&caps[1], caps[5].trim())
                    .at(line_no, column)
                    .with_code(&caps[4])
                    .with_severity(Severity::Warning),
            )
        })
        .collect()
}
