//! Infrastructure layer for lintmux
//!
//! Adapters implementing the application layer's ports:
//!
//! - [`process::ProcessRunner`]: `tokio::process` subprocesses with timeout
//! - [`env`]: captures the host environment and repairs `HOME`
//! - [`availability`]: tool binary and AI provider probes
//! - [`tools`]: the built-in tool adapters
//! - [`config`]: figment-layered TOML configuration
//! - [`ai`]: HTTP AI providers (feature `ai`)

pub mod ai;
pub mod availability;
pub mod config;
pub mod env;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use ai::create_provider;
pub use availability::{AvailabilityCache, PathAvailability};
pub use config::{
    ConfigLoadError, ConfigLoader, ConfigSource, FileAiConfig, FileConfig, FileExecutionConfig,
    FileOutputConfig, FileToolConfig, KNOWN_PROVIDERS, ManifestError, load_manifest,
};
pub use env::capture_env;
pub use process::ProcessRunner;
pub use tools::{CommandTool, ToolRecipe, builtin_recipes, register_builtin_tools};
