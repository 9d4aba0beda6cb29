//! black (`--check` / `--diff` status lines)

use regex::Regex;
use std::sync::LazyLock;

use crate::core::text::non_blank;
use crate::issue::{Issue, Severity};

static REFORMAT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(would reformat|reformatted)\s+(.+?)\s*$").expect("valid black regex")
});

/// Parse black's status lines into one file-level issue per file.
///
/// `would reformat X` (check mode) and `reformatted X` (fix mode) are both
/// recognized; summary lines such as `All done!` are ignored.
pub fn parse_black_output(raw: Option<&str>) -> Vec<Issue> {
    let Some(raw) = non_blank(raw) else {
        return Vec::new();
    };

    raw.lines()
        .filter_map(|line| REFORMAT_LINE.captures(line))
        .map(|caps| {
            let message = if caps[1].eq_ignore_ascii_case("reformatted") {
                "File was reformatted"
            } else {
                "Would reformat file"
            };
            Issue::new(&caps[2], message)
                .with_code("FORMAT")
                .with_severity(Severity::Warning)
                .fixable(true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_mode() {
        let raw = "would reformat src/a.py\nwould reformat src/b.py\n\nOh no! 💥 💔 💥\n2 files would be reformatted.";
        let issues = parse_black_output(Some(raw));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].file, "src/a.py");
        assert_eq!(issues[0].line, 0);
        assert_eq!(issues[1].file, "src/b.py");
        assert!(issues.iter().all(|i| i.fixable));
    }

    #[test]
    fn test_fix_mode_case_insensitive() {
        let issues = parse_black_output(Some("Reformatted lib/x.py\nAll done! ✨ 🍰 ✨"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file, "lib/x.py");
        assert_eq!(issues[0].message, "File was reformatted");
    }

    #[test]
    fn test_clean_run() {
        assert!(parse_black_output(Some("All done! ✨ 🍰 ✨\n3 files left unchanged.")).is_empty());
    }
}
