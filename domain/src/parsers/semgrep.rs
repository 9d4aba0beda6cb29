//! semgrep (`--json`)

use serde_json::Value;

use super::{as_u32, parse_json_document, str_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

pub fn parse_semgrep_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    let Some(doc) = parse_json_document("semgrep", raw) else {
        return Vec::new();
    };
    let Some(results) = doc.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|item| {
            let file = str_field(item, &["path"])?;
            let extra = item.get("extra");
            let message = extra
                .and_then(|e| str_field(e, &["message"]))
                .unwrap_or_default();
            let severity = Severity::from_alias_or(
                extra.and_then(|e| str_field(e, &["severity"])),
                Severity::Warning,
            );
            let pos = |key: &str, field: &str| {
                item.get(key)
                    .and_then(|p| p.get(field))
                    .and_then(as_u32)
                    .unwrap_or(0)
            };
            Some(
                Issue::new(file, message)
                    .at(pos("start", "line"), pos("start", "col"))
                    .ending_at(pos("end", "line"), pos("end", "col"))
                    .with_code(str_field(item, &["check_id"]).unwrap_or_default())
                    .with_severity(severity),
            )
        })
        .collect()
}
