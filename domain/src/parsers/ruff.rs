//! ruff (`--output-format json`)

use serde_json::Value;

use super::{parse_json_document, str_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

/// Parse ruff's JSON array output.
///
/// Syntax errors (no rule code, or the `E9` family) are errors; every other
/// rule is a warning. An entry with a `fix` object is marked fixable.
pub fn parse_ruff_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    let Some(Value::Array(items)) = parse_json_document("ruff", raw) else {
        return Vec::new();
    };
    items.iter().filter_map(parse_entry).collect()
}

fn parse_entry(item: &Value) -> Option<Issue> {
    let file = str_field(item, &["filename"])?;
    let message = str_field(item, &["message"]).unwrap_or_default();
    let code = str_field(item, &["code"]).unwrap_or_default();
    let position = |key: &str, field: &str| {
        item.get(key)
            .and_then(|loc| loc.get(field))
            .and_then(super::as_u32)
            .unwrap_or(0)
    };

    let severity = if code.is_empty() || code.starts_with("E9") {
        Severity::Error
    } else {
        Severity::Warning
    };
    let fixable = item.get("fix").is_some_and(|fix| !fix.is_null());

    Some(
        Issue::new(file, message)
            .at(position("location", "row"), position("location", "column"))
            .ending_at(position("end_location", "row"), position("end_location", "column"))
            .with_code(code)
            .with_severity(severity)
            .fixable(fixable),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "code": "F401",
            "filename": "src/app.py",
            "location": {"row": 1, "column": 8},
            "end_location": {"row": 1, "column": 10},
            "message": "`os` imported but unused",
            "fix": {"applicability": "safe", "edits": []}
        },
        {
            "code": "E501",
            "filename": "src/app.py",
            "location": {"row": 12, "column": 89},
            "end_location": {"row": 12, "column": 120},
            "message": "Line too long (120 > 88)",
            "fix": null
        }
    ]"#;

    #[test]
    fn test_parse_entries() {
        let issues = parse_ruff_output(Some(SAMPLE));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].file, "src/app.py");
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[0].column, Some(8));
        assert_eq!(issues[0].end_column, Some(10));
        assert_eq!(issues[0].code, "F401");
        assert!(issues[0].fixable);
        assert!(!issues[1].fixable);
        assert_eq!(issues[1].severity, Severity::Warning);
    }

    #[test]
    fn test_syntax_error_is_error() {
        let raw = r#"[{"code": null, "filename": "a.py", "location": {"row": 2, "column": 1},
                      "end_location": {"row": 2, "column": 2}, "message": "SyntaxError: invalid syntax"}]"#;
        let issues = parse_ruff_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].code.is_empty());
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(parse_ruff_output(Some("[]")).is_empty());
        assert!(parse_ruff_output(Some("not json")).is_empty());
        assert!(parse_ruff_output(Some(r#"{"filename": "a.py"}"#)).is_empty());
    }

    #[test]
    fn test_skips_entries_without_file() {
        let raw = r#"[null, 42, {"code": "E1", "message": "m"},
                      {"filename": "", "message": "m"},
                      {"filename": "ok.py", "code": "E2", "message": "m",
                       "location": {"row": 3, "column": 1}}]"#;
        let issues = parse_ruff_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "ok.py");
        assert_eq!(issues[0].end_line, None);
    }
}
