//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod ai;
mod execution;
mod output;
mod tools;

pub use ai::{FileAiConfig, KNOWN_PROVIDERS};
pub use execution::FileExecutionConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use tools::FileToolConfig;

use lintmux_domain::ToolOptions;
use lintmux_domain::tool::options::OPTION_EXCLUDE_PATTERNS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub execution: FileExecutionConfig,
    /// Per-tool tables keyed by tool name
    pub tools: BTreeMap<String, FileToolConfig>,
    pub ai: FileAiConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    fn tool(&self, name: &str) -> Option<&FileToolConfig> {
        self.tools
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, table)| table)
    }

    /// Options for `tool`: the global exclude patterns, overlaid with the
    /// tool's own table
    pub fn options_for(&self, tool: &str) -> ToolOptions {
        let mut base = ToolOptions::new();
        if !self.execution.exclude_patterns.is_empty() {
            base.insert(OPTION_EXCLUDE_PATTERNS, self.execution.exclude_patterns.clone());
        }
        match self.tool(tool) {
            Some(table) => base.merged(&table.options),
            None => base,
        }
    }

    /// Tools with `enabled = false`, lowercased
    pub fn disabled_tools(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|(_, table)| !table.enabled)
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }

    /// Configured tool names, lowercased
    pub fn configured_tools(&self) -> impl Iterator<Item = String> + '_ {
        self.tools.keys().map(|name| name.to_ascii_lowercase())
    }

    /// Problems worth a warning; none of them prevents a run.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.ai.is_known_provider() {
            warnings.push(format!(
                "ai.provider: unknown provider '{}' (expected one of: {})",
                self.ai.provider,
                KNOWN_PROVIDERS.join(", ")
            ));
        }
        if self.ai.max_delay_secs < self.ai.base_delay_secs {
            warnings.push(format!(
                "ai.max_delay_secs ({}) is below ai.base_delay_secs ({}); every retry waits {}s",
                self.ai.max_delay_secs, self.ai.base_delay_secs, self.ai.max_delay_secs
            ));
        }
        if self.ai.max_fix_issues == 0 {
            warnings.push("ai.max_fix_issues is 0; --ai-fix will propose nothing".to_string());
        }

        warnings
    }
}
