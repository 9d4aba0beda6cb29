//! Per-tool configuration from TOML (`[tools.<name>]` sections)
//!
//! Every key other than `enabled` is a tool option, validated later by the
//! tool adapter itself:
//!
//! ```toml
//! [tools.ruff]
//! select = ["E", "F"]
//! line_length = 100
//!
//! [tools.semgrep]
//! enabled = false
//! ```

use lintmux_domain::ToolOptions;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// One `[tools.<name>]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileToolConfig {
    /// `false` removes the tool from auto-selection
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Remaining keys, passed to the adapter's `set_options`
    #[serde(flatten)]
    pub options: ToolOptions,
}

impl Default for FileToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            options: ToolOptions::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintmux_domain::OptionValue;

    #[test]
    fn test_options_are_flattened() {
        let toml_str = r#"
select = ["E", "F"]
line_length = 100
fast = true
"#;
        let config: FileToolConfig = toml::from_str(toml_str).unwrap();
        assert!(config.enabled);
        assert_eq!(config.options.get_list("select"), ["E", "F"]);
        assert_eq!(config.options.get("line_length"), Some(&OptionValue::Int(100)));
        assert_eq!(config.options.get_bool("fast"), Some(true));
        assert!(config.options.get("enabled").is_none());
    }

    #[test]
    fn test_disabled_tool() {
        let config: FileToolConfig = toml::from_str("enabled = false").unwrap();
        assert!(!config.enabled);
        assert!(config.options.is_empty());
    }
}
