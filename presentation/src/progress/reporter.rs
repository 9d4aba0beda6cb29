//! Progress reporting for tool runs
//!
//! Both reporters draw on stderr so stdout stays clean for `--output json`.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lintmux_application::RunProgress;
use lintmux_domain::{RunResult, SkippedTool};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Reports progress with an indicatif bar and spinner message
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunProgress for ProgressReporter {
    fn on_run_start(&self, total_tools: usize) {
        let pb = ProgressBar::new(total_tools as u64);
        pb.set_style(Self::run_style());
        pb.set_prefix("Running tools");
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.bar() = Some(pb);
    }

    fn on_tool_start(&self, name: &str, _index: usize, _total: usize) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(name.to_string());
        }
    }

    fn on_tool_complete(&self, result: &RunResult) {
        if let Some(pb) = self.bar().as_ref() {
            pb.println(completion_line(result));
            pb.inc(1);
        }
    }

    fn on_run_complete(&self) {
        if let Some(pb) = self.bar().take() {
            pb.finish_and_clear();
        }
    }
}

/// Plain line-per-tool progress (no fancy UI)
pub struct SimpleProgress;

impl RunProgress for SimpleProgress {
    fn on_run_start(&self, total_tools: usize) {
        eprintln!("{} {} ({} tools)", "->".cyan(), "Running tools".bold(), total_tools);
    }

    fn on_tool_complete(&self, result: &RunResult) {
        eprintln!("{}", completion_line(result));
    }

    fn on_tool_skipped(&self, skipped: &SkippedTool) {
        eprintln!("  {} {} ({})", "-".dimmed(), skipped.name, skipped.reason.dimmed());
    }
}

fn completion_line(result: &RunResult) -> String {
    let elapsed = format!("{:.2}s", result.duration.as_secs_f64()).dimmed();
    if result.is_failure() {
        format!("  {} {} failed {}", "x".red(), result.name, elapsed)
    } else if result.issues_count == 0 {
        format!("  {} {} {}", "v".green(), result.name, elapsed)
    } else {
        format!(
            "  {} {} {} {}",
            "!".yellow(),
            result.name,
            format!("{} issues", result.issues_count).yellow(),
            elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintmux_domain::{Issue, ToolFailure};

    #[test]
    fn test_completion_lines() {
        colored::control::set_override(false);
        let ok = RunResult::completed("black", vec![], "");
        assert!(completion_line(&ok).contains("v black"));

        let issues = RunResult::completed("ruff", vec![Issue::new("a.py", "x")], "");
        assert!(completion_line(&issues).contains("ruff 1 issues"));

        let failed = RunResult::failed("mypy", ToolFailure::spawn("not found"));
        assert!(completion_line(&failed).contains("x mypy failed"));
    }

    #[test]
    fn test_reporter_lifecycle_without_run_start() {
        let reporter = ProgressReporter::new();
        reporter.on_tool_start("ruff", 0, 1);
        reporter.on_tool_complete(&RunResult::completed("ruff", vec![], ""));
        reporter.on_run_complete();
        assert!(reporter.bar().is_none());
    }
}
