//! Configuration file loading for lintmux
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LINTMUX_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lintmux.toml` or `./.lintmux.toml`
//! 4. Global: `$XDG_CONFIG_HOME/lintmux/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod manifest;

pub use file_config::{
    FileAiConfig, FileConfig, FileExecutionConfig, FileOutputConfig, FileOutputFormat,
    FileToolConfig, KNOWN_PROVIDERS,
};
pub use loader::{ConfigLoadError, ConfigLoader, ConfigSource};
pub use manifest::{ManifestError, load_manifest};
