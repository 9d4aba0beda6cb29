//! Domain error types

use thiserror::Error;

/// Invalid configuration handed to a tool adapter.
///
/// These are caller mistakes and are surfaced before any tool executes;
/// they are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unknown option '{key}' for tool '{tool}'")]
    UnknownOption { tool: String, key: String },

    #[error("Invalid value for option '{key}' of tool '{tool}': expected {expected}")]
    InvalidOptionValue {
        tool: String,
        key: String,
        expected: String,
    },

    #[error("Malformed option '{0}': expected tool:key=value")]
    MalformedOption(String),
}

impl ConfigurationError {
    /// The option key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigurationError::UnknownOption { key, .. }
            | ConfigurationError::InvalidOptionValue { key, .. } => Some(key),
            ConfigurationError::MalformedOption(_) => None,
        }
    }
}

/// A capability was invoked on a tool that does not provide it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Tool '{tool}' does not support {operation}")]
pub struct UnsupportedOperation {
    pub tool: String,
    pub operation: String,
}

impl UnsupportedOperation {
    pub fn fix(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            operation: "fix".to_string(),
        }
    }
}
