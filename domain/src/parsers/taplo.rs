//! taplo (`lint` diagnostics and `fmt --check` log lines)

use regex::Regex;
use std::sync::LazyLock;

use crate::core::text::{non_blank, strip_ansi_codes};
use crate::issue::{Issue, Severity};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(error|warning)\[([^\]]+)\]:\s*(.+)$").expect("valid taplo header regex")
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-->\s*(.+):(\d+):(\d+)\s*$").expect("valid taplo location regex")
});

static FMT_CHECK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^ERROR\s+taplo:format_files:\s*(.+?)\s+path="([^"]+)""#)
        .expect("valid taplo fmt regex")
});

/// How many lines after a header may hold its `-->` location
const LOCATION_LOOKAHEAD: usize = 4;

/// Parse taplo output.
///
/// ```text
/// error[invalid_value]: invalid value
///   --> pyproject.toml:5:10
/// ```
///
/// A header whose location is not found within the next few lines is
/// dropped, as is any issue without a file.
pub fn parse_taplo_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };
    let text = strip_ansi_codes(raw);
    let lines: Vec<&str> = text.lines().collect();
    let mut issues = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = FMT_CHECK.captures(line) {
            issues.push(
                Issue::new(&caps[2], caps[1].trim())
                    .with_code("format")
                    .with_severity(Severity::Error)
                    .fixable(true),
            );
            continue;
        }

        let Some(caps) = HEADER.captures(line) else {
            continue;
        };
        let location = lines
            .iter()
            .skip(i + 1)
            .take(LOCATION_LOOKAHEAD)
            .find_map(|l| LOCATION.captures(l));
        let Some(loc) = location else {
            continue;
        };
        let (Ok(line_no), Ok(column)) = (loc[2].parse::<u32>(), loc[3].parse::<u32>()) else {
            continue;
        };

        let severity = Severity::from_alias_or(Some(&caps[1]), Severity::Error);
        issues.push(
            Issue::new(loc[1].trim(), caps[3].trim())
                .at(line_no, column)
                .with_code(&caps[2])
                .with_severity(severity),
        );
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_diagnostic() {
        let raw = "error[invalid_value]: invalid value\n  --> pyproject.toml:5:10\n   |\n 5 | version =\n   |          ^ expected a value\n";
        let issues = parse_taplo_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "pyproject.toml");
        assert_eq!(issues[0].line, 5);
        assert_eq!(issues[0].column, Some(10));
        assert_eq!(issues[0].code, "invalid_value");
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_fmt_check_line() {
        let raw = r#"ERROR taplo:format_files: the file is not properly formatted path="/repo/Cargo.toml""#;
        let issues = parse_taplo_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "/repo/Cargo.toml");
        assert_eq!(issues[0].code, "format");
        assert_eq!(issues[0].message, "the file is not properly formatted");
        assert_eq!(issues[0].line, 0);
    }

    #[test]
    fn test_header_without_location_dropped() {
        let raw = "warning[schema]: no schema found\n\n\n\n\n  --> late.toml:1:1";
        assert!(parse_taplo_output(Some(raw)).is_empty());
    }

    #[test]
    fn test_multiple_diagnostics() {
        let raw = "warning[dup]: duplicate key\n --> a.toml:2:1\nerror[syntax]: unexpected token\n --> b.toml:7:3";
        let issues = parse_taplo_output(Some(raw));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].file, "b.toml");
    }
}
