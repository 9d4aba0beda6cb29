//! shellcheck (`--format json1` or `--format json`)

use serde_json::Value;

use super::{parse_json_document, str_field, u32_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

/// Parse shellcheck JSON output.
///
/// Accepts both the bare array of `--format json` and the
/// `{"comments": [...]}` wrapper of `--format json1`. Numeric codes become
/// `SC####`; a missing level means error.
pub fn parse_shellcheck_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    let items = match parse_json_document("shellcheck", raw) {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut obj)) => match obj.remove("comments") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items.iter().filter_map(parse_entry).collect()
}

fn parse_entry(item: &Value) -> Option<Issue> {
    let file = str_field(item, &["file"])?;
    let code = match item.get("code") {
        Some(Value::Number(n)) => format!("SC{}", n),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => String::new(),
    };
    let severity = Severity::from_alias_or(str_field(item, &["level"]), Severity::Error);

    Some(
        Issue::new(file, str_field(item, &["message"]).unwrap_or_default())
            .at(
                u32_field(item, &["line"]).unwrap_or(0),
                u32_field(item, &["column"]).unwrap_or(0),
            )
            .ending_at(
                u32_field(item, &["endLine"]).unwrap_or(0),
                u32_field(item, &["endColumn"]).unwrap_or(0),
            )
            .with_code(code)
            .with_severity(severity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"file": "deploy.sh", "line": 10, "endLine": 10, "column": 5, "endColumn": 10,
         "level": "warning", "code": 2086, "message": "Double quote to prevent globbing and word splitting."},
        {"file": "deploy.sh", "line": 3, "column": 1, "level": "style", "code": 2148,
         "message": "Tips depend on target shell"}
    ]"#;

    #[test]
    fn test_parse_array() {
        let issues = parse_shellcheck_output(Some(SAMPLE));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, "SC2086");
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].end_column, Some(10));
        assert_eq!(issues[1].severity, Severity::Info);
    }

    #[test]
    fn test_parse_json1_wrapper() {
        let raw = format!(r#"{{"comments": {}}}"#, SAMPLE);
        assert_eq!(parse_shellcheck_output(Some(&raw)).len(), 2);
    }

    #[test]
    fn test_missing_level_defaults_to_error() {
        let raw = r#"[{"file": "a.sh", "line": 1, "code": 1000, "message": "m"}]"#;
        let issues = parse_shellcheck_output(Some(raw));
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let raw = r#"[null, 42, {"line": 1}, {"file": "", "line": 2}, {"file": "ok.sh", "line": 3, "code": 2034}]"#;
        let issues = parse_shellcheck_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "ok.sh");
    }

    #[test]
    fn test_not_json() {
        assert!(parse_shellcheck_output(Some("In deploy.sh line 3:")).is_empty());
        assert!(parse_shellcheck_output(Some(r#"{"other": 1}"#)).is_empty());
    }
}
