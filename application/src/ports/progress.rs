//! Progress notification port
//!
//! Defines the interface for reporting progress while tools run.

use lintmux_domain::{RunResult, SkippedTool};

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, nothing).
pub trait RunProgress: Send + Sync {
    /// Called once the run list is known
    fn on_run_start(&self, _total_tools: usize) {}

    /// Called when a tool starts (`index` is 0-based)
    fn on_tool_start(&self, _name: &str, _index: usize, _total: usize) {}

    /// Called when a tool finishes, successfully or not
    fn on_tool_complete(&self, _result: &RunResult) {}

    /// Called for every tool left out of the run
    fn on_tool_skipped(&self, _skipped: &SkippedTool) {}

    /// Called after the last tool
    fn on_run_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RunProgress for NoProgress {}
