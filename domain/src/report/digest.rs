//! Issue digest: a compact view of a report for consoles and AI prompts
//!
//! Text form:
//!
//! ```text
//! ruff:
//!   [F401] `os` imported but unused (x12)
//!     src/a.py:1, src/b.py:4, src/c.py:2 (+9 more)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use super::Report;
use crate::issue::Issue;

/// Sample locations kept per group
pub const MAX_DIGEST_SAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestGroup {
    pub tool: String,
    pub code: String,
    pub count: usize,
    /// Message of the first issue in the group
    pub message: String,
    /// Up to [`MAX_DIGEST_SAMPLES`] locations
    pub samples: Vec<String>,
}

impl DigestGroup {
    /// Locations not listed in `samples`
    pub fn remaining(&self) -> usize {
        self.count.saturating_sub(self.samples.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDigest {
    pub total_issues: usize,
    pub tool_count: usize,
    pub groups: Vec<DigestGroup>,
}

impl IssueDigest {
    pub fn from_report(report: &Report, workspace_root: Option<&Path>) -> Self {
        let groups = report
            .code_groups()
            .into_iter()
            .map(|group| DigestGroup {
                tool: group.tool.to_string(),
                code: group.code.to_string(),
                count: group.count(),
                message: group.message().to_string(),
                samples: group
                    .issues
                    .iter()
                    .take(MAX_DIGEST_SAMPLES)
                    .map(|issue| sample_location(issue, workspace_root))
                    .collect(),
            })
            .collect();

        Self {
            total_issues: report.total_issues(),
            tool_count: report.tool_count(),
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render the text form. An empty digest renders as an empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut current_tool: Option<&str> = None;

        for group in &self.groups {
            if current_tool != Some(group.tool.as_str()) {
                if current_tool.is_some() {
                    out.push('\n');
                }
                let _ = writeln!(out, "{}:", group.tool);
                current_tool = Some(group.tool.as_str());
            }

            let code = if group.code.is_empty() { "-" } else { group.code.as_str() };
            let _ = writeln!(out, "  [{}] {} (x{})", code, group.message, group.count);
            if !group.samples.is_empty() {
                let _ = write!(out, "    {}", group.samples.join(", "));
                if group.remaining() > 0 {
                    let _ = write!(out, " (+{} more)", group.remaining());
                }
                out.push('\n');
            }
        }

        out
    }
}

fn sample_location(issue: &Issue, workspace_root: Option<&Path>) -> String {
    let file = display_path(&issue.file, workspace_root);
    match issue.line {
        0 => file,
        line => format!("{}:{}", file, line),
    }
}

/// Absolute paths under `root` are shown relative to it.
pub(crate) fn display_path(file: &str, root: Option<&Path>) -> String {
    let path = Path::new(file);
    match root {
        Some(root) if path.is_absolute() => path
            .strip_prefix(root)
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .unwrap_or_else(|_| file.to_string()),
        _ => file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::RunResult;

    fn report_with(issues: Vec<Issue>) -> Report {
        Report::from_results(&[RunResult::completed("ruff", issues, "")], &[])
    }

    #[test]
    fn test_empty_report_renders_empty() {
        let digest = Report::default().digest(None);
        assert!(digest.is_empty());
        assert_eq!(digest.render(), "");
    }

    #[test]
    fn test_groups_and_counts() {
        let report = report_with(vec![
            Issue::new("src/a.py", "Use of assert").at_line(10).with_code("B101"),
            Issue::new("src/b.py", "Use of assert").at_line(20).with_code("B101"),
            Issue::new("src/a.py", "Line too long").at_line(42).with_code("E501"),
        ]);
        let text = report.digest(None).render();
        assert!(text.starts_with("ruff:\n"));
        assert!(text.contains("[B101] Use of assert (x2)"));
        assert!(text.contains("[E501] Line too long (x1)"));
        assert!(text.contains("src/a.py:10, src/b.py:20"));
    }

    #[test]
    fn test_samples_capped() {
        let issues = (0..10)
            .map(|i| Issue::new(format!("src/f{}.py", i), "test").at_line(i + 1).with_code("E501"))
            .collect();
        let digest = report_with(issues).digest(None);
        assert_eq!(digest.groups[0].samples.len(), MAX_DIGEST_SAMPLES);
        assert!(digest.render().contains("(+7 more)"));
    }

    #[test]
    fn test_absolute_paths_relative_to_root() {
        let root = std::env::temp_dir().join("lintmux-digest");
        let file = root.join("src").join("hidden.py");
        let file = file.to_string_lossy().to_string();
        let report = report_with(vec![Issue::new(&file, "Line too long").at_line(1).with_code("E501")]);

        let text = report.digest(Some(root.as_path())).render();
        assert!(text.contains("src/hidden.py:1"));
        assert!(!text.contains(&file));
    }

    #[test]
    fn test_json_round_trip_preserves_totals() {
        let report = report_with(vec![
            Issue::new("a.py", "m").at_line(1).with_code("E1"),
            Issue::new("b.py", "m").at_line(2).with_code("E1"),
            Issue::new("c.py", "n").with_code("E2"),
        ]);
        let digest = report.digest(None);
        let json = serde_json::to_string(&digest).unwrap();
        let back: IssueDigest = serde_json::from_str(&json).unwrap();

        assert_eq!(back, digest);
        assert_eq!(back.total_issues, 3);
        assert_eq!(back.groups.iter().map(|g| g.count).sum::<usize>(), back.total_issues);
    }
}
