//! Run results: what one invocation of one tool produced
//!
//! A [`RunResult`] is produced for every tool on the run list, whether the
//! subprocess succeeded, reported issues, timed out or never started. The
//! [`failure`](RunResult::failure) field classifies runs that could not
//! produce a trustworthy issue list:
//!
//! | Kind | Cause |
//! |------|-------|
//! | `Spawn` | Binary missing or not executable |
//! | `Timeout` | Subprocess exceeded its timeout and was killed |
//! | `Panic` | Adapter or parser panicked |
//! | `ExitStatus` | Non-zero exit without any parseable issues |
//! | `Unsupported` | Capability invoked that the tool does not provide |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::definition::duration_secs;
use crate::issue::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Spawn,
    Timeout,
    Panic,
    ExitStatus,
    Unsupported,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Spawn => "spawn",
            FailureKind::Timeout => "timeout",
            FailureKind::Panic => "panic",
            FailureKind::ExitStatus => "exit status",
            FailureKind::Unsupported => "unsupported",
        }
    }
}

/// Classified failure of a single tool run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ToolFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn spawn(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Spawn, message)
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("Timed out after {}s", after.as_secs_f64()),
        )
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Panic, message)
    }

    pub fn exit_status(code: Option<i32>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = match code {
            Some(code) if message.is_empty() => format!("Exited with status {}", code),
            Some(code) => format!("Exited with status {}: {}", code, message),
            None if message.is_empty() => "Terminated by signal".to_string(),
            None => message,
        };
        Self::new(FailureKind::ExitStatus, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unsupported, message)
    }
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Outcome of running one tool once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Name of the tool that ran
    pub name: String,
    /// `true` when the tool ran cleanly and reported nothing
    pub success: bool,
    pub issues: Vec<Issue>,
    pub issues_count: usize,
    /// Combined stdout/stderr, or the failure reason
    pub raw_output: String,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ToolFailure>,
}

impl RunResult {
    /// Result of a run that completed and was parsed
    pub fn completed(name: impl Into<String>, issues: Vec<Issue>, raw_output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: issues.is_empty(),
            issues_count: issues.len(),
            issues,
            raw_output: raw_output.into(),
            duration: Duration::ZERO,
            failure: None,
        }
    }

    /// Result of a run that could not produce issues.
    ///
    /// The failure message doubles as `raw_output` so that consoles always
    /// have something to show.
    pub fn failed(name: impl Into<String>, failure: ToolFailure) -> Self {
        Self {
            name: name.into(),
            success: false,
            issues: Vec::new(),
            issues_count: 0,
            raw_output: failure.message.clone(),
            duration: Duration::ZERO,
            failure: Some(failure),
        }
    }

    /// Replace `raw_output` (e.g. with the subprocess output of a failed run)
    pub fn with_raw_output(mut self, raw_output: impl Into<String>) -> Self {
        self.raw_output = raw_output.into();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// A tool left out of a run, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedTool {
    pub name: String,
    pub reason: String,
}

impl SkippedTool {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_without_issues_is_success() {
        let result = RunResult::completed("black", vec![], "All done!");
        assert!(result.success);
        assert_eq!(result.issues_count, 0);
        assert!(!result.is_failure());
    }

    #[test]
    fn test_completed_with_issues() {
        let issues = vec![Issue::new("a.py", "m"), Issue::new("b.py", "m")];
        let result = RunResult::completed("ruff", issues, "[]");
        assert!(!result.success);
        assert_eq!(result.issues_count, 2);
        assert!(!result.is_failure());
    }

    #[test]
    fn test_failed_carries_reason() {
        let result = RunResult::failed("ruff", ToolFailure::spawn("binary 'ruff' not found"));
        assert!(!result.success);
        assert!(result.issues.is_empty());
        assert_eq!(result.raw_output, "binary 'ruff' not found");
        assert_eq!(result.failure.as_ref().map(|f| f.kind), Some(FailureKind::Spawn));
    }

    #[test]
    fn test_exit_status_message() {
        assert_eq!(ToolFailure::exit_status(Some(2), "").message, "Exited with status 2");
        assert_eq!(
            ToolFailure::exit_status(Some(1), "boom").message,
            "Exited with status 1: boom"
        );
        assert_eq!(ToolFailure::exit_status(None, "").message, "Terminated by signal");
    }

    #[test]
    fn test_timeout_message() {
        let failure = ToolFailure::timeout(Duration::from_secs(30));
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert!(failure.message.contains("30"));
    }
}
