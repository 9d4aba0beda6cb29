//! Output format value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a run's report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per issue, no grouping
    Plain,
    /// Issues grouped under a section per tool (default)
    #[default]
    Grouped,
    /// Markdown tables, one section per tool
    Markdown,
    /// Standalone HTML page
    Html,
    /// Machine-readable report and digest
    Json,
    /// One row per issue
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Grouped => "grouped",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Terminal renderings that may carry colors and AI sections
    pub fn is_console(&self) -> bool {
        matches!(self, OutputFormat::Plain | OutputFormat::Grouped)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "grouped" | "grid" => Ok(OutputFormat::Grouped),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown output format '{other}' (expected plain, grouped, markdown, html, json or csv)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_grouped() {
        assert_eq!(OutputFormat::default(), OutputFormat::Grouped);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Plain).unwrap(), "\"plain\"");
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("GRID".parse::<OutputFormat>().unwrap(), OutputFormat::Grouped);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(" CSV ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_console_formats() {
        assert!(OutputFormat::Plain.is_console());
        assert!(OutputFormat::Grouped.is_console());
        assert!(!OutputFormat::Html.is_console());
        assert!(!OutputFormat::Json.is_console());
    }
}
