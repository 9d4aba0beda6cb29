//! hadolint (`--format json`)

use serde_json::Value;

use super::{parse_json_document, str_field, u32_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

pub fn parse_hadolint_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    let Some(Value::Array(items)) = parse_json_document("hadolint", raw) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let file = str_field(item, &["file"])?;
            let severity = Severity::from_alias_or(str_field(item, &["level"]), Severity::Warning);
            Some(
                Issue::new(file, str_field(item, &["message"]).unwrap_or_default())
                    .at(
                        u32_field(item, &["line"]).unwrap_or(0),
                        u32_field(item, &["column"]).unwrap_or(0),
                    )
                    .with_code(str_field(item, &["code"]).unwrap_or_default())
                    .with_severity(severity),
            )
        })
        .collect()
}
