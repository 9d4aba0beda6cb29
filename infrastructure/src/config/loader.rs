//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level file names, checked in order
const PROJECT_FILES: &[&str] = &["lintmux.toml", ".lintmux.toml"];

/// Prefix of environment overrides (`LINTMUX_AI__MODEL=gpt-4o`)
const ENV_PREFIX: &str = "LINTMUX_";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Where a configuration layer comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub path: PathBuf,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LINTMUX_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./lintmux.toml` or `./.lintmux.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/lintmux/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigLoadError> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new("."),
            config_path,
        )
    }

    /// [`load`](Self::load) with explicit global path and project directory
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, ConfigLoadError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            tracing::debug!(path = %global_path.display(), "Loading global config");
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::project_config_path_in(project_dir) {
            tracing::debug!(path = %path.display(), "Loading project config");
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigLoadError::NotFound(path.to_path_buf()));
            }
            tracing::debug!(path = %path.display(), "Loading explicit config");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigLoadError::Invalid(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/lintmux/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lintmux").join("config.toml"))
    }

    /// The project-level config file in the current directory, if any
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Every file layer, highest priority first
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();
        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                path: path.to_path_buf(),
                found: path.exists(),
            });
        }
        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project",
                path,
                found: true,
            },
            None => ConfigSource {
                label: "Project",
                path: PathBuf::from(PROJECT_FILES[0]),
                found: false,
            },
        });
        if let Some(path) = Self::global_config_path() {
            let found = path.exists();
            sources.push(ConfigSource {
                label: "Global",
                path,
                found,
            });
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintmux_domain::{OptionValue, OutputFormat};
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.tools.is_empty());
        assert_eq!(config.ai.provider, "anthropic");
    }

    #[test]
    fn test_global_config_path_names_lintmux() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("lintmux/config.toml"));
        }
    }

    #[test]
    fn test_layers_merge_in_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[output]\nformat = \"plain\"\n\n[tools.ruff]\nline_length = 80\n",
        )
        .unwrap();

        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join(".lintmux.toml"), "[tools.ruff]\nline_length = 100\n").unwrap();

        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[output]\nformat = \"json\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project, None).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Plain));
        assert_eq!(
            config.options_for("ruff").get("line_length"),
            Some(&OptionValue::Int(100))
        );

        let config = ConfigLoader::load_from(Some(&global), &project, Some(&explicit)).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ConfigLoader::load_from(None, dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigLoadError::NotFound(_)));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lintmux.toml"), "[output]\nformat = \"table\"\n").unwrap();
        let err = ConfigLoader::load_from(None, dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }
}
