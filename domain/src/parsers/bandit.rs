//! bandit (`-f json`)

use serde_json::Value;

use super::{normalize_path, parse_json_document, str_field, u32_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

/// Parse bandit's JSON report.
///
/// bandit reports 0-based column offsets; they are shifted to 1-based.
pub fn parse_bandit_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    // bandit prints progress lines before the report on some versions
    let start = raw.find('{').unwrap_or(0);
    let Some(doc) = parse_json_document("bandit", &raw[start..]) else {
        return Vec::new();
    };
    let Some(results) = doc.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };
    results.iter().filter_map(parse_entry).collect()
}

fn parse_entry(item: &Value) -> Option<Issue> {
    let file = str_field(item, &["filename"])?;
    let column = u32_field(item, &["col_offset"]).map_or(0, |c| c.saturating_add(1));
    let severity = Severity::from_alias_or(str_field(item, &["issue_severity"]), Severity::Warning);

    Some(
        Issue::new(
            normalize_path(file),
            str_field(item, &["issue_text"]).unwrap_or_default(),
        )
        .at(u32_field(item, &["line_number"]).unwrap_or(0), column)
        .with_code(str_field(item, &["test_id"]).unwrap_or_default())
        .with_severity(severity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "errors": [],
        "results": [
            {
                "filename": "./app/db.py",
                "line_number": 42,
                "col_offset": 8,
                "test_id": "B608",
                "issue_text": "Possible SQL injection vector",
                "issue_severity": "MEDIUM",
                "issue_confidence": "LOW"
            },
            {
                "filename": "./app/auth.py",
                "line_number": 5,
                "col_offset": 0,
                "test_id": "B105",
                "issue_text": "Possible hardcoded password",
                "issue_severity": "HIGH"
            },
            {"line_number": 1}
        ]
    }"#;

    #[test]
    fn test_parse_results() {
        let issues = parse_bandit_output(Some(SAMPLE));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, "B608");
        assert_eq!(issues[0].column, Some(9));
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].severity, Severity::Error);
        assert_eq!(issues[1].column, Some(1));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let raw = r#"{"results": [
            null,
            42,
            {"line_number": 3, "test_id": "B101", "issue_text": "no file"},
            {"filename": "", "line_number": 3, "test_id": "B101", "issue_text": "empty file"},
            {"filename": "app/main.py", "line_number": 3, "col_offset": 4, "test_id": "B101",
             "issue_text": "Use of assert detected", "issue_severity": "LOW"}
        ]}"#;
        let issues = parse_bandit_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "app/main.py");
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_huge_column_offset_saturates() {
        let raw = r#"{"results": [
            {"filename": "a.py", "line_number": 1, "col_offset": 4294967295, "test_id": "B105",
             "issue_text": "Possible hardcoded password", "issue_severity": "HIGH"},
            {"filename": "b.py", "line_number": 2, "col_offset": 0, "test_id": "B105",
             "issue_text": "Possible hardcoded password", "issue_severity": "HIGH"}
        ]}"#;
        let issues = parse_bandit_output(Some(raw));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].column, Some(u32::MAX));
        assert_eq!(issues[1].column, Some(1));
    }

    #[test]
    fn test_leading_noise() {
        let raw = format!("[main]\tINFO\trunning on Python 3.12\n{}", SAMPLE);
        assert_eq!(parse_bandit_output(Some(&raw)).len(), 2);
    }

    #[test]
    fn test_no_results_key() {
        assert!(parse_bandit_output(Some(r#"{"errors": []}"#)).is_empty());
        assert!(parse_bandit_output(Some("garbage")).is_empty());
    }
}
