//! Canonical severity levels

use serde::{Deserialize, Serialize};

/// Canonical severity of an issue.
///
/// Each tool has its own vocabulary (`style`, `HIGH`, `note`, ...). Parsers
/// map it onto these three levels with [`Severity::from_alias`], falling back
/// to a tool-specific default when the native value is missing or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Map a native tool severity string onto a canonical level.
    ///
    /// | Native values | Level |
    /// |---------------|-------|
    /// | error, high, critical, failed, fatal | Error |
    /// | warning, warn, medium, unknown | Warning |
    /// | info, note, hint, style, help, low, refactor, convention | Info |
    ///
    /// Matching is case-insensitive. Returns `None` for anything else.
    pub fn from_alias(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" | "high" | "critical" | "failed" | "fatal" => Some(Severity::Error),
            "warning" | "warn" | "medium" | "unknown" => Some(Severity::Warning),
            "info" | "note" | "hint" | "style" | "help" | "low" | "refactor" | "convention" => {
                Some(Severity::Info)
            }
            _ => None,
        }
    }

    /// Like [`from_alias`](Self::from_alias) but with an explicit fallback
    /// for missing or unrecognized values.
    pub fn from_alias_or(value: Option<&str>, fallback: Severity) -> Self {
        value.and_then(Self::from_alias).unwrap_or(fallback)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
