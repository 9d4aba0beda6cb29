//! Console output formatter for lintmux reports

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use lintmux_domain::{
    AiSummary, FixSuggestion, Issue, OutputFormat, Report, Severity, ToolDefinition, format_cost,
    format_token_count,
};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Formats reports for console display
#[derive(Debug, Clone, Default)]
pub struct ConsoleFormatter {
    /// Paths under this root are shown relative to it
    workspace_root: Option<PathBuf>,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Format the report in `format`
    pub fn format(&self, report: &Report, format: OutputFormat) -> String {
        match format {
            OutputFormat::Plain => self.format_plain(report),
            OutputFormat::Grouped => self.format_grouped(report),
            OutputFormat::Markdown => self.format_markdown(report),
            OutputFormat::Html => self.format_html(report),
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Csv => self.format_csv(report),
        }
    }

    /// One line per issue, then failures and totals
    pub fn format_plain(&self, report: &Report) -> String {
        let mut output = String::new();
        for issue in report.issues() {
            output.push_str(&format!(
                "{}: {} [{}] {}{}\n",
                self.location(issue),
                severity_label(issue.severity),
                issue.tool,
                code_prefix(issue),
                issue.message
            ));
        }
        output.push_str(&self.failures(report));
        output.push_str(&self.skipped(report));
        output.push_str(&Self::totals_line(report));
        output
    }

    /// A section per tool, then failures, skipped tools and a totals table
    pub fn format_grouped(&self, report: &Report) -> String {
        let mut output = String::new();

        for result in &report.results {
            let title = format!(
                "── {} ({} {}, {:.2}s) ──",
                result.name,
                result.issues_count,
                plural(result.issues_count, "issue"),
                result.duration.as_secs_f64()
            );
            let title = if result.is_failure() {
                title.red().bold()
            } else if result.issues_count == 0 {
                title.green().bold()
            } else {
                title.yellow().bold()
            };
            output.push_str(&format!("\n{}\n", title));

            if let Some(failure) = &result.failure {
                output.push_str(&format!(
                    "  {} {}\n",
                    format!("{}:", failure.kind.as_str()).red(),
                    failure.message
                ));
                continue;
            }
            if result.issues.is_empty() {
                output.push_str(&format!("  {}\n", "No issues found".dimmed()));
                continue;
            }
            for issue in &result.issues {
                output.push_str(&format!(
                    "  {}  {}  {}{}{}\n",
                    self.location(issue).bold(),
                    severity_label(issue.severity),
                    code_prefix(issue).cyan(),
                    issue.message,
                    if issue.fixable { " (fixable)".dimmed() } else { "".normal() }
                ));
            }
        }

        output.push_str(&self.skipped(report));
        output.push('\n');
        output.push_str(&Self::totals_table(report));
        output
    }

    /// Force colors on or off; by default `colored` follows the terminal
    /// and `NO_COLOR`
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Report, per-tool totals and digest as pretty JSON
    pub fn format_json(&self, report: &Report) -> String {
        self.format_json_with_ai(report, None, &[])
    }

    /// [`format_json`](Self::format_json) plus AI results, as one document
    pub fn format_json_with_ai(
        &self,
        report: &Report,
        summary: Option<&AiSummary>,
        fixes: &[FixSuggestion],
    ) -> String {
        let mut value = json!({
            "passing": report.failed_tools().is_empty() && report.total_issues() == 0,
            "total_issues": report.total_issues(),
            "tool_count": report.tool_count(),
            "errors": report.count_by_severity(Severity::Error),
            "warnings": report.count_by_severity(Severity::Warning),
            "infos": report.count_by_severity(Severity::Info),
            "totals": report.tool_totals(),
            "results": report.results,
            "skipped": report.skipped,
            "digest": report.digest(self.workspace_root.as_deref()),
        });
        if let Some(summary) = summary {
            value["ai_summary"] = json!(summary);
        }
        if !fixes.is_empty() {
            value["ai_fixes"] = json!(fixes);
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// Registered tools with tier and capabilities
    pub fn format_tool_list<'a>(
        definitions: impl IntoIterator<Item = &'a ToolDefinition>,
        is_available: impl Fn(&ToolDefinition) -> bool,
    ) -> String {
        let mut output = format!(
            "{}\n",
            format!("{:<14} {:<9} {:<5} {:<10} {}", "TOOL", "TIER", "FIX", "STATUS", "DESCRIPTION").bold()
        );
        for definition in definitions {
            let status = if is_available(definition) {
                "installed".green()
            } else {
                "missing".dimmed()
            };
            output.push_str(&format!(
                "{:<14} {:<9} {:<5} {:<10} {}\n",
                definition.name,
                definition.tier,
                if definition.can_fix { "yes" } else { "no" },
                status,
                definition.description
            ));
        }
        output
    }

    fn location(&self, issue: &Issue) -> String {
        Issue {
            file: self.display_file(issue),
            ..issue.clone()
        }
        .location()
    }

    /// The issue's file, relative to the workspace root when under it
    pub(crate) fn display_file(&self, issue: &Issue) -> String {
        self.workspace_root
            .as_deref()
            .and_then(|root| Path::new(&issue.file).strip_prefix(root).ok())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| issue.file.clone())
    }

    fn failures(&self, report: &Report) -> String {
        report
            .failed_tools()
            .into_iter()
            .map(|result| {
                let message = result
                    .failure
                    .as_ref()
                    .map(|f| f.message.as_str())
                    .unwrap_or("failed");
                format!("{} {}: {}\n", "x".red(), result.name.bold(), message)
            })
            .collect()
    }

    fn skipped(&self, report: &Report) -> String {
        if report.skipped.is_empty() {
            return String::new();
        }
        let mut output = format!("\n{}\n", "Skipped:".dimmed());
        for skipped in &report.skipped {
            output.push_str(&format!("  {} ({})", skipped.name, skipped.reason).dimmed().to_string());
            output.push('\n');
        }
        output
    }

    fn totals_line(report: &Report) -> String {
        format!("{}\n", status_color(report, Self::totals_text(report)))
    }

    /// Uncolored one-line summary of issue and tool counts
    pub(crate) fn totals_text(report: &Report) -> String {
        format!(
            "{} {} ({} errors, {} warnings, {} info) from {} {}",
            report.total_issues(),
            plural(report.total_issues(), "issue"),
            report.count_by_severity(Severity::Error),
            report.count_by_severity(Severity::Warning),
            report.count_by_severity(Severity::Info),
            report.tool_count(),
            plural(report.tool_count(), "tool")
        )
    }

    /// Per-tool totals table
    pub fn totals_table(report: &Report) -> String {
        let mut output = format!(
            "{}\n",
            format!(
                "{:<14} {:>6} {:>6} {:>8} {:>6} {:>8} {:>8}",
                "TOOL", "ISSUES", "ERROR", "WARNING", "INFO", "FIXABLE", "TIME"
            )
            .bold()
        );
        for totals in report.tool_totals() {
            let row = format!(
                "{:<14} {:>6} {:>6} {:>8} {:>6} {:>8} {:>7.2}s",
                totals.tool,
                if totals.failed { "FAIL".to_string() } else { totals.issues.to_string() },
                totals.errors,
                totals.warnings,
                totals.infos,
                totals.fixable,
                totals.duration.as_secs_f64()
            );
            let row = if totals.failed {
                row.red()
            } else if totals.issues == 0 {
                row.green()
            } else {
                row.normal()
            };
            output.push_str(&format!("{}\n", row));
        }
        output.push_str(&Self::totals_line(report));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report, format: OutputFormat) -> String {
        self.format(report, format)
    }

    fn format_summary(&self, summary: &AiSummary) -> String {
        let mut output = format!("\n{}\n", "AI Summary".cyan().bold());
        output.push_str(&format!("{}\n", summary.overview));

        let sections = [
            ("Key patterns", &summary.key_patterns),
            ("Priority actions", &summary.priority_actions),
            ("Triage", &summary.triage_suggestions),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}\n", title.bold()));
            for (i, item) in items.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, item));
            }
        }
        if !summary.estimated_effort.is_empty() {
            output.push_str(&format!("\n{} {}\n", "Estimated effort:".bold(), summary.estimated_effort));
        }
        output.push_str(&usage_line(
            summary.input_tokens,
            summary.output_tokens,
            summary.cost_estimate,
        ));
        output
    }

    fn format_fixes(&self, fixes: &[FixSuggestion]) -> String {
        if fixes.is_empty() {
            return format!("\n{}\n", "No AI fix suggestions".dimmed());
        }
        let mut output = format!(
            "\n{}\n",
            format!("AI Fix Suggestions ({})", fixes.len()).cyan().bold()
        );
        for fix in fixes {
            output.push_str(&format!(
                "\n{} {} [{}] confidence: {}\n",
                "──".yellow(),
                format!("{}:{}", fix.file, fix.line).bold(),
                fix.code,
                fix.confidence
            ));
            if !fix.explanation.is_empty() {
                output.push_str(&format!("{}\n", fix.explanation));
            }
            for line in fix.diff.lines() {
                let line = if line.starts_with("+++") || line.starts_with("---") {
                    line.bold()
                } else if line.starts_with('+') {
                    line.green()
                } else if line.starts_with('-') {
                    line.red()
                } else {
                    line.normal()
                };
                output.push_str(&format!("{}\n", line));
            }
        }
        output
    }
}

fn usage_line(input_tokens: u64, output_tokens: u64, cost: f64) -> String {
    format!(
        "{}\n",
        format!(
            "\n{} in / {} out tokens, {}",
            format_token_count(input_tokens),
            format_token_count(output_tokens),
            format_cost(cost)
        )
        .dimmed()
    )
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".blue(),
    }
}

fn code_prefix(issue: &Issue) -> String {
    if issue.code.is_empty() {
        String::new()
    } else {
        format!("{} ", issue.code)
    }
}

pub(crate) fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn status_color(report: &Report, line: String) -> ColoredString {
    if !report.failed_tools().is_empty() || report.count_by_severity(Severity::Error) > 0 {
        line.red().bold()
    } else if report.total_issues() > 0 {
        line.yellow().bold()
    } else {
        line.green().bold()
    }
}
