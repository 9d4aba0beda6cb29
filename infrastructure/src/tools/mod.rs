//! Tool adapters
//!
//! Every built-in tool is a [`ToolRecipe`] executed by one generic
//! [`CommandTool`]:
//!
//! ```text
//! catalog (recipes) ──▶ register_builtin_tools ──▶ PluginRegistry
//!                                                      │ get(name)
//!                                                      ▼
//!              discovery ◀── CommandTool ──▶ CommandRunner ──▶ parser
//! ```

pub mod catalog;
pub mod command_tool;
pub mod discovery;
pub mod recipe;

pub use catalog::builtin_recipes;
pub use command_tool::CommandTool;
pub use discovery::{FileFilter, discover_files};
pub use recipe::{ArgsFn, Invocation, OutputStream, Target, ToolRecipe};

use lintmux_application::{CommandRunner, PluginRegistry, RegistryError, plugin_factory};
use std::path::PathBuf;
use std::sync::Arc;

/// Register every built-in tool, each running through `runner` in `workdir`.
pub fn register_builtin_tools(
    registry: &mut PluginRegistry,
    runner: Arc<dyn CommandRunner>,
    workdir: impl Into<PathBuf>,
) -> Result<(), RegistryError> {
    let workdir = workdir.into();
    for recipe in builtin_recipes() {
        let definition = recipe.definition.clone();
        let recipe = Arc::new(recipe);
        let runner = runner.clone();
        let workdir = workdir.clone();
        registry.register(
            definition,
            plugin_factory(move || CommandTool::new(recipe.clone(), runner.clone(), workdir.clone())),
        )?;
    }
    Ok(())
}
