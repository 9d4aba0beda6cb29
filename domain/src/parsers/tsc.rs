//! tsc (`--noEmit --pretty false`)

use regex::Regex;
use std::sync::LazyLock;

use super::normalize_path;
use crate::core::text::{non_blank, strip_ansi_codes};
use crate::issue::{Issue, Severity};

static DIAGNOSTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<file>.+?)\((?P<line>\d+),(?P<column>\d+)\):\s*(?P<severity>error|warning)\s+(?P<code>TS\d+):\s*(?P<message>.+)$",
    )
    .expect("valid tsc regex")
});

/// Parse `file(line,col): error TS####: message` diagnostics.
///
/// Color codes are stripped first and Windows separators are normalized.
/// Continuation lines of multi-line messages are not attached.
pub fn parse_tsc_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };

    strip_ansi_codes(raw)
        .lines()
        .filter_map(|line| {
            let caps = DIAGNOSTIC.captures(line.trim_end())?;
            let severity = Severity::from_alias_or(Some(&caps["severity"]), Severity::Error);
            Some(
                Issue::new(normalize_path(&caps["file"]), caps["message"].trim())
                    .at(caps["line"].parse().ok()?, caps["column"].parse().ok()?)
                    .with_code(&caps["code"])
                    .with_severity(severity),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diagnostics() {
        let raw = "src/index.ts(12,5): error TS2322: Type 'string' is not assignable to type 'number'.\n\
                   src\\win\\file.ts(1,1): warning TS6133: 'x' is declared but its value is never read.\n\
                   Found 2 errors.";
        let issues = parse_tsc_output(Some(raw));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].file, "src/index.ts");
        assert_eq!(issues[0].line, 12);
        assert_eq!(issues[0].column, Some(5));
        assert_eq!(issues[0].code, "TS2322");
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[1].file, "src/win/file.ts");
        assert_eq!(issues[1].severity, Severity::Warning);
    }

    #[test]
    fn test_ansi_stripped() {
        let raw = "\x1b[96msrc/a.ts\x1b[0m(3,7): \x1b[91merror\x1b[0m TS1005: ';' expected.";
        let issues = parse_tsc_output(Some(raw));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "src/a.ts");
        assert_eq!(issues[0].message, "';' expected.");
    }
}
