//! Select Tools use case
//!
//! Decides which registered tools run for an action and which are skipped.
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | Explicit name not registered | `UnknownTool` error |
//! | Explicit non-fixer for `fmt` | `UnsupportedAction` error |
//! | Auto-selected non-fixer for `fmt` | skipped |
//! | Disabled in configuration | skipped (auto-selection only) |
//! | Not in the allow-list (manifest) | left out (auto-selection only) |
//! | Binary missing and no `auto_install` | skipped |
//!
//! Survivors are ordered by `(priority, name)`; skips keep registration
//! order.

use crate::ports::availability::ToolAvailability;
use crate::registry::{PluginRegistry, RegistryError};
use lintmux_domain::{Action, SkippedTool, ToolDefinition};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error(transparent)]
    UnknownTool(#[from] RegistryError),

    #[error("Tool '{tool}' does not support {operation}")]
    UnsupportedAction { tool: String, operation: String },
}

/// Input for tool selection
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub action: Action,
    /// Explicit tool names; empty means "all registered"
    pub tools: Vec<String>,
    /// Tier filter for auto-selection; empty means "all tiers"
    pub tiers: Vec<String>,
    pub auto_install: bool,
    /// Tools removed from auto-selection by configuration
    pub disabled: Vec<String>,
    /// Restricts auto-selection to these names; `Some(empty)` selects nothing
    pub allowed: Option<Vec<String>>,
}

impl SelectionRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            tools: Vec::new(),
            tiers: Vec::new(),
            auto_install: false,
            disabled: Vec::new(),
            allowed: None,
        }
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tiers<I, S>(mut self, tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tiers = tiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_auto_install(mut self, auto_install: bool) -> Self {
        self.auto_install = auto_install;
        self
    }

    pub fn with_disabled<I, S>(mut self, disabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled = disabled.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.allowed
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|a| a == name))
    }
}

/// Result of tool selection
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Tools to run, in execution order
    pub run: Vec<ToolDefinition>,
    pub skipped: Vec<SkippedTool>,
}

impl Selection {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.run.iter().map(|def| def.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }
}

pub struct SelectToolsUseCase {
    registry: Arc<PluginRegistry>,
    availability: Arc<dyn ToolAvailability>,
}

impl SelectToolsUseCase {
    pub fn new(registry: Arc<PluginRegistry>, availability: Arc<dyn ToolAvailability>) -> Self {
        Self {
            registry,
            availability,
        }
    }

    pub fn execute(&self, request: &SelectionRequest) -> Result<Selection, SelectionError> {
        let mut candidates: Vec<&ToolDefinition> = Vec::new();
        let mut skipped = Vec::new();

        if request.tools.is_empty() {
            for def in self.registry.definitions() {
                if !request.tiers.is_empty() && !request.tiers.iter().any(|t| def.in_tier(t)) {
                    continue;
                }
                if !request.is_allowed(&def.name) {
                    continue;
                }
                if request.disabled.iter().any(|d| d == &def.name) {
                    skipped.push(SkippedTool::new(&def.name, "disabled in configuration"));
                    continue;
                }
                if request.action.requires_fix() && !def.can_fix {
                    skipped.push(SkippedTool::new(&def.name, "does not support formatting"));
                    continue;
                }
                candidates.push(def);
            }
        } else {
            let mut seen = HashSet::new();
            for name in &request.tools {
                if !seen.insert(name.as_str()) {
                    continue;
                }
                let def = self.registry.definition(name)?;
                if request.action.requires_fix() && !def.can_fix {
                    return Err(SelectionError::UnsupportedAction {
                        tool: def.name.clone(),
                        operation: "formatting".to_string(),
                    });
                }
                candidates.push(def);
            }
        }

        let mut run = Vec::with_capacity(candidates.len());
        for def in candidates {
            if !request.auto_install && !self.availability.is_available(&def.executable) {
                debug!(tool = %def.name, executable = %def.executable, "Tool binary not found");
                skipped.push(SkippedTool::new(
                    &def.name,
                    format!("binary '{}' not found", def.executable),
                ));
                continue;
            }
            run.push(def.clone());
        }

        // Skips collected in two passes; restore registration order
        let order: Vec<&str> = self.registry.list_names(None).collect();
        skipped.sort_by_key(|s: &SkippedTool| order.iter().position(|n| *n == s.name));

        run.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));

        debug!(
            action = %request.action,
            run = run.len(),
            skipped = skipped.len(),
            "Tool selection complete"
        );
        Ok(Selection { run, skipped })
    }
}
