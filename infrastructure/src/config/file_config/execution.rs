//! Execution configuration from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Run tools whose binary is missing instead of skipping them.
    ///
    /// Nothing is installed; the tool is attempted and fails if absent.
    pub auto_install: bool,
    /// Glob patterns excluded from every tool's file discovery
    pub exclude_patterns: Vec<String>,
    /// Tiers auto-selection draws from; empty means all
    pub tiers: Vec<String>,
}
