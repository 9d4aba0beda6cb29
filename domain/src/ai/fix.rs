//! AI fix suggestions
//!
//! Suggestions are proposals only. Nothing in this crate writes them back
//! to disk.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

use super::strip_code_fence;

/// Lines of context on each side of the issue line
pub const DEFAULT_CONTEXT_RADIUS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub tool: String,
    pub file: String,
    pub line: u32,
    pub code: String,
    pub original_code: String,
    pub suggested_code: String,
    pub explanation: String,
    /// `high`, `medium` or `low` as reported by the model
    pub confidence: String,
    /// Unified diff from `original_code` to `suggested_code`
    pub diff: String,
}

#[derive(Deserialize)]
struct FixPayload {
    #[serde(default)]
    original_code: String,
    #[serde(default)]
    suggested_code: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    confidence: String,
}

/// Parse the model's fix response.
///
/// Returns `None` for non-JSON responses, an empty `original_code`, or a
/// suggestion identical to the original.
pub fn parse_fix_response(content: &str, file: &str, line: u32, code: &str) -> Option<FixSuggestion> {
    let payload: FixPayload = match serde_json::from_str(strip_code_fence(content)) {
        Ok(p) => p,
        Err(e) => {
            debug!("Fix response for {}:{} is not JSON: {}", file, line, e);
            return None;
        }
    };
    if payload.original_code.trim().is_empty() || payload.original_code == payload.suggested_code {
        return None;
    }

    let confidence = match payload.confidence.trim().to_ascii_lowercase().as_str() {
        c @ ("high" | "medium" | "low") => c.to_string(),
        _ => "medium".to_string(),
    };
    let diff = unified_diff(file, line, &payload.original_code, &payload.suggested_code);

    Some(FixSuggestion {
        tool: String::new(),
        file: file.to_string(),
        line,
        code: code.to_string(),
        original_code: payload.original_code,
        suggested_code: payload.suggested_code,
        explanation: payload.explanation,
        confidence,
        diff,
    })
}

/// Window of `radius` lines around 1-based `line`, clamped to the file.
///
/// Returns `(text, start, end)` with 1-based inclusive bounds.
pub fn extract_context(content: &str, line: u32, radius: usize) -> (String, usize, usize) {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return (String::new(), 1, 1);
    }
    let line = (line.max(1) as usize).min(lines.len());
    let start = line.saturating_sub(radius).max(1);
    let end = (line + radius).min(lines.len());
    (lines[start - 1..end].join("\n"), start, end)
}

/// Single-hunk unified diff replacing `original` with `suggested` at `line`.
///
/// Empty when the two are identical.
pub fn unified_diff(file: &str, line: u32, original: &str, suggested: &str) -> String {
    if original == suggested {
        return String::new();
    }
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = suggested.lines().collect();
    let start = line.max(1);

    let mut out = String::new();
    let _ = writeln!(out, "--- a/{}", file);
    let _ = writeln!(out, "+++ b/{}", file);
    let _ = writeln!(out, "@@ -{},{} +{},{} @@", start, old.len(), start, new.len());
    for l in &old {
        let _ = writeln!(out, "-{}", l);
    }
    for l in &new {
        let _ = writeln!(out, "+{}", l);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_response() {
        let content = r#"{
            "original_code": "assert x > 0",
            "suggested_code": "if not x > 0:\n    raise ValueError",
            "explanation": "Replace assert",
            "confidence": "high"
        }"#;
        let fix = parse_fix_response(content, "main.py", 10, "B101").unwrap();
        assert_eq!(fix.file, "main.py");
        assert_eq!(fix.confidence, "high");
        assert!(fix.diff.contains("-assert x > 0"));
        assert!(fix.diff.contains("+    raise ValueError"));
    }

    #[test]
    fn test_rejected_responses() {
        assert!(parse_fix_response("not json", "main.py", 10, "B101").is_none());
        let identical = r#"{"original_code": "x = 1", "suggested_code": "x = 1"}"#;
        assert!(parse_fix_response(identical, "main.py", 10, "B101").is_none());
        let empty = r#"{"original_code": "", "suggested_code": "new code"}"#;
        assert!(parse_fix_response(empty, "main.py", 10, "B101").is_none());
    }

    #[test]
    fn test_unknown_confidence_is_medium() {
        let content = r#"{"original_code": "a", "suggested_code": "b", "confidence": "certain"}"#;
        assert_eq!(parse_fix_response(content, "f", 1, "c").unwrap().confidence, "medium");
    }

    #[test]
    fn test_extract_context() {
        let content = (1..=30).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let (text, start, end) = extract_context(&content, 15, 5);
        assert_eq!((start, end), (10, 20));
        assert!(text.contains("line 15"));
        assert!(text.starts_with("line 10"));
    }

    #[test]
    fn test_extract_context_clamps() {
        let content = (1..=10).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        assert_eq!(extract_context(&content, 1, 5).1, 1);
        assert_eq!(extract_context(&content, 10, 5).2, 10);
        assert_eq!(extract_context(&content, 99, 5).2, 10);
    }

    #[test]
    fn test_unified_diff() {
        let diff = unified_diff("test.py", 3, "old code\n", "new code\n");
        assert!(diff.contains("--- a/test.py"));
        assert!(diff.contains("+++ b/test.py"));
        assert!(diff.contains("@@ -3,1 +3,1 @@"));
        assert!(diff.contains("-old code"));
        assert!(diff.contains("+new code"));
        assert_eq!(unified_diff("test.py", 1, "same\n", "same\n"), "");
    }
}
