//! Run Tools use case
//!
//! Executes the selected tools one after another and collects their
//! results.
//!
//! ```text
//! Selection ──▶ instantiate plugins ──▶ apply options (all or nothing)
//!                                             │
//!        ┌────────────────────────────────────┘
//!        ▼
//!   for each tool:  check / fix ──▶ RunResult   (panics and unsupported
//!                                                operations become failed
//!                                                results; the queue goes on)
//! ```

use crate::ports::progress::{NoProgress, RunProgress};
use crate::ports::tool_plugin::ToolPlugin;
use crate::registry::{PluginRegistry, RegistryError};
use crate::use_cases::select_tools::Selection;
use futures::FutureExt;
use lintmux_domain::{
    Action, ConfigurationError, Report, RunResult, SkippedTool, ToolFailure, ToolOptions,
};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Input for one run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub action: Action,
    pub paths: Vec<PathBuf>,
    /// Per-tool option overrides, keyed by tool name
    pub tool_options: BTreeMap<String, ToolOptions>,
}

impl RunRequest {
    pub fn new(action: Action, paths: Vec<PathBuf>) -> Self {
        Self {
            action,
            paths,
            tool_options: BTreeMap::new(),
        }
    }

    pub fn with_tool_options(mut self, tool_options: BTreeMap<String, ToolOptions>) -> Self {
        self.tool_options = tool_options;
        self
    }
}

/// Output of one run
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// One result per executed tool, in execution order
    pub results: Vec<RunResult>,
    pub skipped: Vec<SkippedTool>,
}

impl RunOutput {
    pub fn into_report(self) -> Report {
        Report::from_results(&self.results, &self.skipped)
    }
}

pub struct RunToolsUseCase {
    registry: Arc<PluginRegistry>,
}

impl RunToolsUseCase {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Execute with default (no-op) progress
    pub async fn execute(&self, selection: &Selection, request: &RunRequest) -> Result<RunOutput, RunError> {
        self.execute_with_progress(selection, request, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        selection: &Selection,
        request: &RunRequest,
        progress: &dyn RunProgress,
    ) -> Result<RunOutput, RunError> {
        let plugins = self.prepare(selection, request)?;

        info!(
            action = %request.action,
            tools = plugins.len(),
            skipped = selection.skipped.len(),
            "Starting run"
        );
        progress.on_run_start(plugins.len());
        for skipped in &selection.skipped {
            debug!(tool = %skipped.name, reason = %skipped.reason, "Tool skipped");
            progress.on_tool_skipped(skipped);
        }

        let total = plugins.len();
        let mut results = Vec::with_capacity(total);
        for (index, plugin) in plugins.iter().enumerate() {
            let name = plugin.definition().name.as_str();
            progress.on_tool_start(name, index, total);

            let result = run_isolated(plugin.as_ref(), request).await;
            if result.is_failure() {
                warn!(tool = %name, reason = %result.raw_output, "Tool failed");
            } else {
                debug!(tool = %name, issues = result.issues_count, "Tool finished");
            }

            progress.on_tool_complete(&result);
            results.push(result);
        }

        progress.on_run_complete();
        Ok(RunOutput {
            results,
            skipped: selection.skipped.clone(),
        })
    }

    /// Instantiate every selected plugin and apply its options.
    ///
    /// Any configuration error aborts before a single tool runs.
    fn prepare(&self, selection: &Selection, request: &RunRequest) -> Result<Vec<Box<dyn ToolPlugin>>, RunError> {
        for name in request.tool_options.keys() {
            if !self.registry.contains(name) {
                debug!(tool = %name, "Options given for unregistered tool, ignoring");
            }
        }

        let mut plugins = Vec::with_capacity(selection.run.len());
        for def in &selection.run {
            let mut plugin = self.registry.get(&def.name)?;
            if let Some(options) = request.tool_options.get(&def.name) {
                plugin.set_options(options.clone())?;
            }
            plugins.push(plugin);
        }
        Ok(plugins)
    }
}

/// Run one plugin, turning panics and unsupported operations into a failed
/// result.
async fn run_isolated(plugin: &dyn ToolPlugin, request: &RunRequest) -> RunResult {
    let name = plugin.definition().name.clone();
    let options = plugin.options();
    let started = Instant::now();

    let invocation = async {
        match request.action {
            Action::Check => Ok(plugin.check(&request.paths, options).await),
            Action::Fmt => plugin.fix(&request.paths, options).await,
        }
    };

    let result = match AssertUnwindSafe(invocation).catch_unwind().await {
        Ok(Ok(result)) => result,
        Ok(Err(unsupported)) => {
            warn!(tool = %name, error = %unsupported, "Unsupported operation");
            RunResult::failed(&name, ToolFailure::unsupported(unsupported.to_string()))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(tool = %name, panic = %message, "Tool panicked");
            RunResult::failed(&name, ToolFailure::panic(format!("Tool panicked: {}", message)))
        }
    };

    if result.duration.is_zero() {
        result.with_duration(started.elapsed())
    } else {
        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
