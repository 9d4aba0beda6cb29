//! Issue entity

use serde::{Deserialize, Serialize};

use super::Severity;

/// One normalized finding reported by a tool.
///
/// `line == 0` marks a file-level issue. `tool` is empty until aggregation
/// attaches the originating tool name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    #[serde(default)]
    pub code: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub fixable: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool: String,
}

impl Issue {
    /// Create a file-level issue with warning severity.
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: 0,
            column: None,
            end_line: None,
            end_column: None,
            code: String::new(),
            message: message.into(),
            severity: Severity::Warning,
            fixable: false,
            tool: String::new(),
        }
    }

    /// Set the start position. A column of 0 is treated as absent.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = (column > 0).then_some(column);
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Set the end position. Zero values are treated as absent.
    pub fn ending_at(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = (end_line > 0).then_some(end_line);
        self.end_column = (end_column > 0).then_some(end_column);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn fixable(mut self, fixable: bool) -> Self {
        self.fixable = fixable;
        self
    }

    /// Return a copy of this issue attributed to `tool`.
    pub fn with_tool(&self, tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            ..self.clone()
        }
    }

    /// `file:line[:column]`, or just `file` for file-level issues
    pub fn location(&self) -> String {
        match (self.line, self.column) {
            (0, _) => self.file.clone(),
            (line, Some(col)) => format!("{}:{}:{}", self.file, line, col),
            (line, None) => format!("{}:{}", self.file, line),
        }
    }
}
