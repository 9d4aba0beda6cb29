//! Plugin Registry
//!
//! The [`PluginRegistry`] is the catalog of tool adapters keyed by name. It
//! is an explicit value: build one at startup, wrap it in an `Arc` and pass
//! it to selection and execution. Tests build a fresh registry each.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = PluginRegistry::new();
//! registry.register(ruff_definition(), plugin_factory(Ruff::new))?;
//!
//! let plugin = registry.get("ruff")?; // fresh instance
//! let names: Vec<_> = registry.list_names(Some("security")).collect();
//! ```
//!
//! # Registration checks
//!
//! Registration instantiates the factory once and verifies:
//!
//! 1. the plugin reports the same definition name
//! 2. `can_fix` agrees with [`ToolPlugin::as_fixable`]
//!
//! Re-registering a name with an identical definition is a no-op.

use crate::ports::tool_plugin::ToolPlugin;
use lintmux_domain::ToolDefinition;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Produces a fresh, unconfigured plugin instance
pub type PluginFactory = Arc<dyn Fn() -> Box<dyn ToolPlugin> + Send + Sync>;

/// Wrap a constructor for a concrete plugin type into a [`PluginFactory`]
pub fn plugin_factory<P, F>(make: F) -> PluginFactory
where
    P: ToolPlugin + 'static,
    F: Fn() -> P + Send + Sync + 'static,
{
    Arc::new(move || Box::new(make()) as Box<dyn ToolPlugin>)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{0}' is already registered with a different definition")]
    DuplicateTool(String),

    #[error("Tool '{tool}' capability mismatch: {reason}")]
    CapabilityMismatch { tool: String, reason: String },

    #[error("Unknown tool '{name}'. Available tools: [{}]", .available.join(", "))]
    UnknownTool { name: String, available: Vec<String> },
}

struct Entry {
    definition: ToolDefinition,
    factory: PluginFactory,
}

/// Catalog of registered tool plugins
#[derive(Default)]
pub struct PluginRegistry {
    /// Entries in registration order
    entries: Vec<Entry>,
    /// Tool name -> index into `entries`
    index: HashMap<String, usize>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    pub fn register(
        &mut self,
        definition: ToolDefinition,
        factory: PluginFactory,
    ) -> Result<(), RegistryError> {
        if let Some(&idx) = self.index.get(&definition.name) {
            if self.entries[idx].definition == definition {
                tracing::trace!(tool = %definition.name, "Tool already registered, ignoring");
                return Ok(());
            }
            return Err(RegistryError::DuplicateTool(definition.name));
        }

        let probe = factory();
        let plugin_name = &probe.definition().name;
        if *plugin_name != definition.name {
            return Err(RegistryError::CapabilityMismatch {
                tool: definition.name.clone(),
                reason: format!("plugin reports name '{}'", plugin_name),
            });
        }
        let has_fix = probe.as_fixable().is_some();
        if has_fix != definition.can_fix {
            let reason = if definition.can_fix {
                "definition declares can_fix but plugin has no fix capability"
            } else {
                "plugin has a fix capability but definition does not declare can_fix"
            };
            return Err(RegistryError::CapabilityMismatch {
                tool: definition.name.clone(),
                reason: reason.to_string(),
            });
        }

        tracing::debug!(
            tool = %definition.name,
            tier = %definition.tier,
            can_fix = definition.can_fix,
            "Registered tool"
        );
        self.index.insert(definition.name.clone(), self.entries.len());
        self.entries.push(Entry { definition, factory });
        Ok(())
    }

    /// A fresh plugin instance for `name`
    pub fn get(&self, name: &str) -> Result<Box<dyn ToolPlugin>, RegistryError> {
        self.entry(name).map(|entry| (entry.factory)())
    }

    pub fn definition(&self, name: &str) -> Result<&ToolDefinition, RegistryError> {
        self.entry(name).map(|entry| &entry.definition)
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> + Clone {
        self.entries.iter().map(|entry| &entry.definition)
    }

    /// Names in registration order, optionally restricted to one tier.
    ///
    /// The iterator is `Clone`, so it can be walked more than once.
    pub fn list_names<'a>(&'a self, tier: Option<&'a str>) -> impl Iterator<Item = &'a str> + Clone + 'a {
        self.entries
            .iter()
            .filter(move |entry| tier.is_none_or(|t| entry.definition.in_tier(t)))
            .map(|entry| entry.definition.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn unknown(&self, name: &str) -> RegistryError {
        RegistryError::UnknownTool {
            name: name.to_string(),
            available: self.list_names(None).map(str::to_string).collect(),
        }
    }

    fn entry(&self, name: &str) -> Result<&Entry, RegistryError> {
        self.index
            .get(name)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| self.unknown(name))
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("tools", &self.list_names(None).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Minimal in-memory plugins shared by the crate's unit tests

    use super::*;
    use crate::ports::tool_plugin::{Checkable, Configurable, Fixable};
    use async_trait::async_trait;
    use lintmux_domain::tool::options::common_option_specs;
    use lintmux_domain::{ConfigurationError, Issue, OptionSpec, RunResult, ToolOptions};
    use std::path::PathBuf;

    pub struct FakePlugin {
        pub definition: ToolDefinition,
        pub options: ToolOptions,
        pub issues: Vec<Issue>,
        pub fixable: bool,
    }

    impl FakePlugin {
        pub fn new(definition: ToolDefinition) -> Self {
            let fixable = definition.can_fix;
            Self {
                definition,
                options: ToolOptions::new(),
                issues: Vec::new(),
                fixable,
            }
        }
    }

    impl Configurable for FakePlugin {
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
    impl Checkable for FakePlugin {
        async fn check(&self, _paths: &[PathBuf], _options: &ToolOptions) -> RunResult {
            RunResult::completed(&self.definition.name, self.issues.clone(), "")
        }
    }

    #[async_trait]
    impl Fixable for FakePlugin {
        async fn fix(&self, _paths: &[PathBuf], _options: &ToolOptions) -> RunResult {
            RunResult::completed(&self.definition.name, Vec::new(), "fixed")
        }
    }

    impl ToolPlugin for FakePlugin {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        fn as_fixable(&self) -> Option<&dyn Fixable> {
            self.fixable.then_some(self as &dyn Fixable)
        }
    }

    pub fn factory_for(definition: ToolDefinition) -> PluginFactory {
        plugin_factory(move || FakePlugin::new(definition.clone()))
    }

    pub fn register(registry: &mut PluginRegistry, definition: ToolDefinition) {
        registry
            .register(definition.clone(), factory_for(definition))
            .unwrap();
    }
}
