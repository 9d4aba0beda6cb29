//! clippy (`cargo clippy --message-format=json`)

use serde_json::Value;

use super::{as_u32, json_lines, normalize_path, str_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

/// Parse cargo's JSON message stream, keeping compiler messages that have a
/// primary span. Build artifacts and summary lines are ignored.
pub fn parse_clippy_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };

    json_lines("clippy", raw)
        .filter(|item| item.get("reason").and_then(Value::as_str) == Some("compiler-message"))
        .filter_map(|item| parse_message(item.get("message")?))
        .collect()
}

fn parse_message(message: &Value) -> Option<Issue> {
    let span = message
        .get("spans")
        .and_then(Value::as_array)?
        .iter()
        .find(|s| s.get("is_primary").and_then(Value::as_bool) == Some(true))?;
    let file = str_field(span, &["file_name"])?;
    let text = str_field(message, &["message"]).unwrap_or_default();
    let code = message
        .get("code")
        .and_then(|c| str_field(c, &["code"]))
        .unwrap_or_default();
    let severity = Severity::from_alias_or(str_field(message, &["level"]), Severity::Warning);
    let pos = |key: &str| span.get(key).and_then(as_u32).unwrap_or(0);
    let fixable = span
        .get("suggestion_applicability")
        .and_then(Value::as_str)
        == Some("MachineApplicable");

    Some(
        Issue::new(normalize_path(file), text)
            .at(pos("line_start"), pos("column_start"))
            .ending_at(pos("line_end"), pos("column_end"))
            .with_code(code)
            .with_severity(severity)
            .fixable(fixable),
    )
}
