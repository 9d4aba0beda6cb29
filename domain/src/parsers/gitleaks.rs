//! gitleaks (`--report-format json`)

use serde_json::Value;

use super::{parse_json_document, str_field, u32_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

/// Parse the gitleaks JSON report.
///
/// Every finding is a leaked secret and therefore an error. The secret
/// itself is never copied into the message.
pub fn parse_gitleaks_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    let Some(Value::Array(items)) = parse_json_document("gitleaks", raw) else {
        return Vec::new();
    };
    items.iter().filter_map(parse_entry).collect()
}

fn parse_entry(item: &Value) -> Option<Issue> {
    let file = str_field(item, &["File", "file"])?;
    let rule = str_field(item, &["RuleID", "rule_id"]).unwrap_or("secret");
    let description = str_field(item, &["Description", "description"])
        .map(String::from)
        .unwrap_or_else(|| format!("Potential secret detected ({})", rule));

    Some(
        Issue::new(file, description)
            .at(
                u32_field(item, &["StartLine", "start_line"]).unwrap_or(0),
                u32_field(item, &["StartColumn", "start_column"]).unwrap_or(0),
            )
            .ending_at(
                u32_field(item, &["EndLine", "end_line"]).unwrap_or(0),
                u32_field(item, &["EndColumn", "end_column"]).unwrap_or(0),
            )
            .with_code(rule)
            .with_severity(Severity::Error),
    )
}
