//! `[output]` section: how reports are rendered

use lintmux_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use lintmux_domain::OutputFormat as FileOutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report format when `--output` is not given
    pub format: Option<OutputFormat>,
    /// `false` turns off ANSI colors in console renderers
    pub color: bool,
    /// Also write the report to this file (`--output-file` wins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use super::*;

    #[test]
    fn test_output_section() {
        let config: FileConfig = toml::from_str(
            r#"
[output]
format = "markdown"
color = false
file = "reports/lint.md"
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Markdown));
        assert!(!config.output.color);
        assert_eq!(config.output.file, Some(PathBuf::from("reports/lint.md")));
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.output, FileOutputConfig::default());
        assert_eq!(config, FileConfig::default());
    }
}
