//! mypy (`--output json`, one object per line)

use serde_json::Value;

use super::{json_lines, normalize_path, str_field, u32_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

pub fn parse_mypy_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    json_lines("mypy", raw).filter_map(|v| parse_entry(&v)).collect()
}

fn parse_entry(item: &Value) -> Option<Issue> {
    let file = str_field(item, &["file", "path"])?;
    let message = str_field(item, &["message"]).unwrap_or_default();
    let mut message = message.to_string();
    if let Some(hint) = str_field(item, &["hint"]) {
        message = format!("{} ({})", message, hint);
    }
    let severity = Severity::from_alias_or(str_field(item, &["severity"]), Severity::Error);

    Some(
        Issue::new(normalize_path(file), message)
            .at(
                u32_field(item, &["line"]).unwrap_or(0),
                u32_field(item, &["column"]).unwrap_or(0),
            )
            .with_code(str_field(item, &["code"]).unwrap_or_default())
            .with_severity(severity),
    )
}
