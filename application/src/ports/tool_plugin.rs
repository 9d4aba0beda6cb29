//! Tool plugin contract
//!
//! Every tool adapter is composed of small capability traits:
//!
//! | Trait | Capability |
//! |-------|------------|
//! | [`Configurable`] | Declares and validates its options |
//! | [`Checkable`] | Read-only analysis (`check`) |
//! | [`Fixable`] | In-place auto-fix (`fix`), optional |
//!
//! [`ToolPlugin`] is the object-safe combination the registry hands out.
//! Fix support is discovered through [`ToolPlugin::as_fixable`] rather than
//! a flag, and the registry verifies at registration time that it agrees
//! with [`ToolDefinition::can_fix`].

use async_trait::async_trait;
use lintmux_domain::{ConfigurationError, OptionSpec, RunResult, ToolDefinition, ToolOptions, UnsupportedOperation};
use std::path::PathBuf;

/// Option handling.
pub trait Configurable: Send + Sync {
    /// Options this plugin accepts, including the common ones
    fn option_specs(&self) -> Vec<OptionSpec>;

    /// Currently stored options
    fn options(&self) -> &ToolOptions;

    /// Validate and store `options`.
    ///
    /// Fails on the first unknown key or kind mismatch; nothing is stored
    /// in that case.
    fn set_options(&mut self, options: ToolOptions) -> Result<(), ConfigurationError>;
}

/// Read-only analysis.
#[async_trait]
pub trait Checkable: Send + Sync {
    /// Analyze `paths` without modifying them.
    ///
    /// Always returns a result: a tool that cannot be started yields
    /// `success = false` with the reason in `raw_output`.
    async fn check(&self, paths: &[PathBuf], options: &ToolOptions) -> RunResult;
}

/// In-place auto-fix.
#[async_trait]
pub trait Fixable: Send + Sync {
    async fn fix(&self, paths: &[PathBuf], options: &ToolOptions) -> RunResult;
}

/// A complete tool adapter
#[async_trait]
pub trait ToolPlugin: Configurable + Checkable {
    fn definition(&self) -> &ToolDefinition;

    /// The fix capability, when this tool has one
    fn as_fixable(&self) -> Option<&dyn Fixable> {
        None
    }

    /// Run the fix capability, or fail with [`UnsupportedOperation`].
    async fn fix(&self, paths: &[PathBuf], options: &ToolOptions) -> Result<RunResult, UnsupportedOperation> {
        match self.as_fixable() {
            Some(fixable) => Ok(fixable.fix(paths, options).await),
            None => Err(UnsupportedOperation::fix(&self.definition().name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintmux_domain::Issue;
    use lintmux_domain::tool::options::common_option_specs;

    struct LintOnly {
        definition: ToolDefinition,
        options: ToolOptions,
    }

    impl Configurable for LintOnly {
        fn option_specs(&self) -> Vec<OptionSpec> {
            common_option_specs().to_vec()
        }

        fn options(&self) -> &ToolOptions {
            &self.options
        }

        fn set_options(&mut self, options: ToolOptions) -> Result<(), ConfigurationError> {
            self.options = options.validate(&self.definition.name, &self.option_specs())?;
            Ok(())
        }
    }

    #[async_trait]
    impl Checkable for LintOnly {
        async fn check(&self, paths: &[PathBuf], _options: &ToolOptions) -> RunResult {
            let issues = paths
                .iter()
                .map(|p| Issue::new(p.to_string_lossy(), "finding"))
                .collect();
            RunResult::completed(&self.definition.name, issues, "")
        }
    }

    impl ToolPlugin for LintOnly {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }
    }

    fn plugin() -> LintOnly {
        LintOnly {
            definition: ToolDefinition::new("lint-only", "test"),
            options: ToolOptions::new(),
        }
    }

    #[tokio::test]
    async fn test_fix_unsupported_without_capability() {
        let plugin = plugin();
        let err = ToolPlugin::fix(&plugin, &[], &ToolOptions::new()).await.unwrap_err();
        assert_eq!(err.tool, "lint-only");
        assert!(err.to_string().contains("does not support fix"));
    }

    #[tokio::test]
    async fn test_check_zero_issues_is_success() {
        let result = plugin().check(&[], &ToolOptions::new()).await;
        assert!(result.success);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_set_options_rejects_unknown_and_keeps_previous() {
        let mut plugin = plugin();
        plugin
            .set_options(ToolOptions::new().with("timeout", 10_i64))
            .unwrap();

        let err = plugin
            .set_options(ToolOptions::new().with("timeout", 5_i64).with("bogus", true))
            .unwrap_err();
        assert_eq!(err.key(), Some("bogus"));
        assert_eq!(plugin.options().get_f64("timeout"), Some(10.0));
    }
}
