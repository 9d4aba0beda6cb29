//! Aggregation and reporting
//!
//! [`Report`] merges the per-tool [`RunResult`]s of one invocation:
//!
//! ```text
//! RunResult (ruff)  ──┐
//! RunResult (black) ──┼──▶ Report ──▶ totals / (tool, code) groups
//! SkippedTool ...   ──┘          └──▶ IssueDigest (console, AI prompt)
//! ```
//!
//! Issues are attributed to their tool while merging. There is no
//! cross-tool de-duplication: two tools reporting the same line both count.

mod digest;

pub use digest::{DigestGroup, IssueDigest, MAX_DIGEST_SAMPLES};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::issue::{Issue, Severity};
use crate::tool::{Action, RunResult, SkippedTool};

/// Per-tool totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolTotals {
    pub tool: String,
    pub issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub fixable: usize,
    pub failed: bool,
    #[serde(skip)]
    pub duration: Duration,
}

/// Issues sharing one `(tool, code)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGroup<'a> {
    pub tool: &'a str,
    pub code: &'a str,
    pub issues: Vec<&'a Issue>,
}

impl CodeGroup<'_> {
    pub fn count(&self) -> usize {
        self.issues.len()
    }

    /// Message of the first issue in the group
    pub fn message(&self) -> &str {
        self.issues.first().map_or("", |i| i.message.as_str())
    }
}

/// Merged outcome of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub results: Vec<RunResult>,
    pub skipped: Vec<SkippedTool>,
}

impl Report {
    /// Merge results, attaching each tool's name to its issues.
    pub fn from_results(results: &[RunResult], skipped: &[SkippedTool]) -> Self {
        let results = results
            .iter()
            .map(|r| RunResult {
                issues: r.issues.iter().map(|i| i.with_tool(&r.name)).collect(),
                ..r.clone()
            })
            .collect();
        Self {
            results,
            skipped: skipped.to_vec(),
        }
    }

    /// Number of tools that actually executed
    pub fn tool_count(&self) -> usize {
        self.results.len()
    }

    pub fn total_issues(&self) -> usize {
        self.results.iter().map(|r| r.issues.len()).sum()
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.results.iter().flat_map(|r| r.issues.iter())
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues().filter(|i| i.severity == severity).count()
    }

    pub fn failed_tools(&self) -> Vec<&RunResult> {
        self.results.iter().filter(|r| r.is_failure()).collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }

    pub fn tool_totals(&self) -> Vec<ToolTotals> {
        self.results
            .iter()
            .map(|r| {
                let by = |s: Severity| r.issues.iter().filter(|i| i.severity == s).count();
                ToolTotals {
                    tool: r.name.clone(),
                    issues: r.issues.len(),
                    errors: by(Severity::Error),
                    warnings: by(Severity::Warning),
                    infos: by(Severity::Info),
                    fixable: r.issues.iter().filter(|i| i.fixable).count(),
                    failed: r.is_failure(),
                    duration: r.duration,
                }
            })
            .collect()
    }

    /// Group issues by `(tool, code)` in first-seen order.
    pub fn code_groups(&self) -> Vec<CodeGroup<'_>> {
        let mut groups: Vec<CodeGroup<'_>> = Vec::new();
        for issue in self.issues() {
            match groups
                .iter_mut()
                .find(|g| g.tool == issue.tool && g.code == issue.code)
            {
                Some(group) => group.issues.push(issue),
                None => groups.push(CodeGroup {
                    tool: &issue.tool,
                    code: &issue.code,
                    issues: vec![issue],
                }),
            }
        }
        groups
    }

    /// Whether the run should exit successfully.
    ///
    /// `check` fails on any issue or tool failure; `fmt` only on tool
    /// failures, since remaining issues are expected after formatting.
    pub fn is_passing(&self, action: Action) -> bool {
        let failed = !self.failed_tools().is_empty();
        match action {
            Action::Check => !failed && self.total_issues() == 0,
            Action::Fmt => !failed,
        }
    }

    pub fn digest(&self, workspace_root: Option<&Path>) -> IssueDigest {
        IssueDigest::from_report(self, workspace_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::result::ToolFailure;

    fn sample_report() -> Report {
        let ruff = RunResult::completed(
            "ruff",
            vec![
                Issue::new("a.py", "unused import").at(1, 1).with_code("F401").fixable(true),
                Issue::new("b.py", "line too long").at(9, 89).with_code("E501"),
                Issue::new("c.py", "unused import").at(2, 1).with_code("F401").fixable(true),
            ],
            "",
        );
        let mypy = RunResult::completed(
            "mypy",
            vec![Issue::new("a.py", "bad type").at_line(3).with_code("F401").with_severity(Severity::Error)],
            "",
        );
        let black = RunResult::completed("black", vec![], "All done!");
        Report::from_results(
            &[ruff, mypy, black],
            &[SkippedTool::new("gitleaks", "binary 'gitleaks' not found")],
        )
    }

    #[test]
    fn test_tool_attached() {
        let report = sample_report();
        assert!(report.results[0].issues.iter().all(|i| i.tool == "ruff"));
        assert!(report.results[1].issues.iter().all(|i| i.tool == "mypy"));
    }

    #[test]
    fn test_totals() {
        let report = sample_report();
        assert_eq!(report.total_issues(), 4);
        assert_eq!(report.tool_count(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.count_by_severity(Severity::Error), 1);

        let totals = report.tool_totals();
        assert_eq!(totals[0].tool, "ruff");
        assert_eq!(totals[0].issues, 3);
        assert_eq!(totals[0].fixable, 2);
        assert_eq!(totals[2].issues, 0);
    }

    #[test]
    fn test_code_groups_first_seen_and_per_tool() {
        let report = sample_report();
        let groups = report.code_groups();
        let keys: Vec<(&str, &str, usize)> =
            groups.iter().map(|g| (g.tool, g.code, g.count())).collect();
        // Same code from another tool stays separate
        assert_eq!(
            keys,
            vec![("ruff", "F401", 2), ("ruff", "E501", 1), ("mypy", "F401", 1)]
        );
        assert_eq!(groups[0].message(), "unused import");
    }

    #[test]
    fn test_is_passing() {
        let report = sample_report();
        assert!(!report.is_passing(Action::Check));
        assert!(report.is_passing(Action::Fmt));

        let clean = Report::from_results(&[RunResult::completed("black", vec![], "")], &[]);
        assert!(clean.is_passing(Action::Check));

        let failed = Report::from_results(
            &[RunResult::failed("ruff", ToolFailure::spawn("not found"))],
            &[],
        );
        assert!(!failed.is_passing(Action::Fmt));
        assert_eq!(failed.failed_tools().len(), 1);
    }
}
