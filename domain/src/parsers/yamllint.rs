//! yamllint (`-f parsable`)

use regex::Regex;
use std::sync::LazyLock;

use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

/// `file:line:col: [level] message (rule)`
static PARSABLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):(\d+):(\d+):\s*\[(\w+)\]\s*(.+?)(?:\s+\(([\w-]+)\))?\s*$")
        .expect("valid yamllint regex")
});

pub fn parse_yamllint_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };

    raw.lines()
        .filter_map(|line| {
            let caps = PARSABLE_LINE.captures(line.trim())?;
            let line_no: u32 = caps[2].parse().ok()?;
            let column: u32 = caps[3].parse().ok()?;
            let severity = Severity::from_alias_or(Some(&caps[4]), Severity::Warning);
            let code = caps.get(6).map_or("", |m| m.as_str());
            Some(
                Issue::new(&caps[1], &caps[5])
                    .at(line_no, column)
                    .with_code(code)
                    .with_severity(severity),
            )
        })
        .collect()
}
