//! Text helpers for the domain layer.

use regex::Regex;
use std::sync::LazyLock;

/// CSI escape sequences (colors, cursor movement) emitted by tools that
/// ignore `--color=never` or detect a pseudo-terminal.
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("valid ANSI regex"));

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
///
/// The cut point is moved back to the nearest character boundary so the
/// result is always valid UTF-8.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Remove ANSI escape sequences from tool output.
pub fn strip_ansi_codes(s: &str) -> String {
    ANSI_ESCAPE.replace_all(s, "").into_owned()
}

/// Returns `None` for missing, empty or whitespace-only raw output.
///
/// Every parser starts with this guard so that `None`, `""` and `"   "`
/// all produce an empty issue list.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte_keeps_boundary() {
        // "é" is two bytes; cutting inside it must step back
        let s = "ééééé";
        let out = truncate(s, 6);
        assert!(out.ends_with("..."));
        assert!(out.starts_with('é'));
    }

    #[test]
    fn test_strip_ansi_codes() {
        let colored = "\x1b[31msrc/a.ts\x1b[0m(1,2): error";
        assert_eq!(strip_ansi_codes(colored), "src/a.ts(1,2): error");
        assert_eq!(strip_ansi_codes("plain"), "plain");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("  \n\t ")), None);
        assert_eq!(non_blank(Some(" x ")), Some(" x "));
    }
}
