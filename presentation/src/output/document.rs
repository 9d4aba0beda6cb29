//! Document renderings of a report: Markdown, HTML and CSV
//!
//! These never carry terminal colors, so they can be written to files or
//! pasted into pull requests and CI summaries as-is.

use super::console::{ConsoleFormatter, plural};
use lintmux_domain::{Issue, Report, RunResult};
use std::fmt::Write as _;
use std::path::Path;

const CSV_HEADER: &str = "tool,file,line,column,severity,code,message,fixable";

impl ConsoleFormatter {
    /// Summary table, then a section per tool with its issues
    pub fn format_markdown(&self, report: &Report) -> String {
        let mut out = String::from("# lintmux report\n\n");
        out.push_str("| Tool | Issues | Status |\n|------|--------|--------|\n");
        for result in &report.results {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                md_cell(&result.name),
                result.issues_count,
                status(result)
            );
        }

        for result in &report.results {
            let _ = write!(out, "\n## {} ({})\n\n", result.name, issue_count(result));
            if let Some(failure) = &result.failure {
                let _ = writeln!(out, "> {}: {}", failure.kind.as_str(), md_cell(&failure.message));
                continue;
            }
            if result.issues.is_empty() {
                out.push_str("No issues found.\n");
                continue;
            }
            out.push_str("| File | Line | Column | Severity | Code | Message |\n");
            out.push_str("|------|------|--------|----------|------|---------|\n");
            for issue in &result.issues {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    md_cell(&self.display_file(issue)),
                    issue.line,
                    column(issue),
                    issue.severity.as_str(),
                    md_cell(&issue.code),
                    md_cell(&issue.message)
                );
            }
        }

        if !report.skipped.is_empty() {
            out.push_str("\n## Skipped\n\n");
            for skipped in &report.skipped {
                let _ = writeln!(out, "- {}: {}", skipped.name, md_cell(&skipped.reason));
            }
        }
        let _ = write!(out, "\n**{}**\n", Self::totals_text(report));
        out
    }

    /// A standalone HTML page with the same layout as the Markdown report
    pub fn format_html(&self, report: &Report) -> String {
        let mut out = String::from(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>lintmux report</title>\n</head>\n<body>\n<h1>lintmux report</h1>\n",
        );
        let _ = writeln!(out, "<p>{}</p>", escape(&Self::totals_text(report)));

        out.push_str("<table>\n<tr><th>Tool</th><th>Issues</th><th>Status</th></tr>\n");
        for result in &report.results {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&result.name),
                result.issues_count,
                status(result)
            );
        }
        out.push_str("</table>\n");

        for result in &report.results {
            let _ = writeln!(out, "<h2>{} ({})</h2>", escape(&result.name), issue_count(result));
            if let Some(failure) = &result.failure {
                let _ = writeln!(
                    out,
                    "<p class=\"failure\">{}: {}</p>",
                    failure.kind.as_str(),
                    escape(&failure.message)
                );
                continue;
            }
            if result.issues.is_empty() {
                out.push_str("<p>No issues found.</p>\n");
                continue;
            }
            out.push_str(
                "<table>\n<tr><th>File</th><th>Line</th><th>Column</th><th>Severity</th><th>Code</th><th>Message</th></tr>\n",
            );
            for issue in &result.issues {
                let _ = writeln!(
                    out,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape(&self.display_file(issue)),
                    issue.line,
                    column(issue),
                    issue.severity.as_str(),
                    escape(&issue.code),
                    escape(&issue.message)
                );
            }
            out.push_str("</table>\n");
        }

        if !report.skipped.is_empty() {
            out.push_str("<h2>Skipped</h2>\n<ul>\n");
            for skipped in &report.skipped {
                let _ = writeln!(
                    out,
                    "<li>{}: {}</li>",
                    escape(&skipped.name),
                    escape(&skipped.reason)
                );
            }
            out.push_str("</ul>\n");
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    /// One row per issue under a fixed header; tools without issues add no rows
    pub fn format_csv(&self, report: &Report) -> String {
        let mut out = format!("{CSV_HEADER}\n");
        for issue in report.issues() {
            let line = issue.line.to_string();
            let col = column(issue);
            let file = self.display_file(issue);
            let fields = [
                issue.tool.as_str(),
                file.as_str(),
                line.as_str(),
                col.as_str(),
                issue.severity.as_str(),
                issue.code.as_str(),
                issue.message.as_str(),
                if issue.fixable { "true" } else { "false" },
            ];
            let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}

/// Write a rendered report to `path`, creating parent directories.
/// Terminal color codes are stripped.
pub fn write_report_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, lintmux_domain::core::text::strip_ansi_codes(contents))
}

fn status(result: &RunResult) -> &'static str {
    if result.is_failure() {
        "failed"
    } else if result.issues_count == 0 {
        "passed"
    } else {
        "issues"
    }
}

fn issue_count(result: &RunResult) -> String {
    if result.is_failure() {
        "failed".to_string()
    } else {
        format!("{} {}", result.issues_count, plural(result.issues_count, "issue"))
    }
}

fn column(issue: &Issue) -> String {
    issue.column.map(|c| c.to_string()).unwrap_or_default()
}

fn md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// RFC 4180 quoting: fields with a comma, quote or line break are quoted
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
