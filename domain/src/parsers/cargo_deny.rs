//! cargo-deny (`--format json`, one object per line)
//!
//! cargo-deny reports at project level, so every issue is a file-level
//! issue on `Cargo.toml`. The affected crate is appended to the message.

use serde_json::Value;

use super::{json_lines, str_field};
use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

const MANIFEST_FILE: &str = "Cargo.toml";

pub fn parse_cargo_deny_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };

    json_lines("cargo-deny", raw)
        .filter_map(|item| {
            let fields = item.get("fields").filter(|f| f.is_object())?;
            match item.get("type").and_then(Value::as_str) {
                Some("diagnostic") => parse_diagnostic(fields),
                Some("advisory") => parse_advisory(fields),
                _ => None,
            }
        })
        .collect()
}

fn parse_diagnostic(fields: &Value) -> Option<Issue> {
    let severity = str_field(fields, &["severity"])?;
    let message = str_field(fields, &["message"]).unwrap_or_default();
    let krate = fields
        .get("labels")
        .and_then(Value::as_array)
        .and_then(|labels| crate_from_labels(labels));

    Some(
        Issue::new(MANIFEST_FILE, with_crate(message, krate.as_deref()))
            .with_code(str_field(fields, &["code"]).unwrap_or_default())
            .with_severity(Severity::from_alias_or(Some(severity), Severity::Warning)),
    )
}

fn parse_advisory(fields: &Value) -> Option<Issue> {
    let advisory = fields.get("advisory").filter(|a| a.is_object())?;
    let id = str_field(advisory, &["id"]).unwrap_or("ADVISORY");
    let title = str_field(advisory, &["title"]).unwrap_or("Security advisory");
    let krate = fields.get("package").and_then(|pkg| {
        let name = str_field(pkg, &["name"])?;
        Some(match str_field(pkg, &["version"]) {
            Some(version) => format!("{}@{}", name, version),
            None => name.to_string(),
        })
    });

    Some(
        Issue::new(MANIFEST_FILE, with_crate(title, krate.as_deref()))
            .with_code(id)
            .with_severity(Severity::Error),
    )
}

/// Labels carry the crate as `crate foo` or `crate foo@1.0.0`
fn crate_from_labels(labels: &[Value]) -> Option<String> {
    labels
        .iter()
        .filter_map(|label| str_field(label, &["message"]))
        .find_map(|msg| msg.strip_prefix("crate "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn with_crate(message: &str, krate: Option<&str>) -> String {
    match krate {
        Some(k) => format!("{} ({})", message, k),
        None => message.to_string(),
    }
}
