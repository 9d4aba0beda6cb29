//! Output formatter trait

use lintmux_domain::{AiSummary, FixSuggestion, OutputFormat, Report};

/// Renders run results for a terminal or a pipe
pub trait OutputFormatter {
    /// Render the report in `format`
    fn format_report(&self, report: &Report, format: OutputFormat) -> String;

    fn format_summary(&self, summary: &AiSummary) -> String;

    fn format_fixes(&self, fixes: &[FixSuggestion]) -> String;
}
