//! Declarative description of a command-line tool
//!
//! A [`ToolRecipe`] says how to invoke one external tool and how to read its
//! output. [`CommandTool`](super::command_tool::CommandTool) turns a recipe
//! into a [`ToolPlugin`](lintmux_application::ToolPlugin).

use lintmux_domain::parsers::ParseFn;
use lintmux_domain::{OptionSpec, ToolDefinition, ToolOptions};
use std::path::PathBuf;

/// What a tool is pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Discovered files matching the definition's patterns; the tool is not
    /// run at all when nothing matches
    Files,
    /// The project as a whole (e.g. `cargo clippy`, `tsc -p`); runs once in
    /// the working directory
    Project,
}

/// Which output stream carries the tool's findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
    Both,
}

/// Inputs available when building a tool's arguments
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub files: &'a [PathBuf],
    pub paths: &'a [PathBuf],
    pub options: &'a ToolOptions,
}

impl Invocation<'_> {
    /// Target files as argument strings
    pub fn file_args(&self) -> impl Iterator<Item = String> + '_ {
        self.files.iter().map(|f| f.to_string_lossy().into_owned())
    }

    /// The first user path, or `.`
    pub fn source(&self) -> String {
        self.paths
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string())
    }
}

pub type ArgsFn = fn(&Invocation<'_>) -> Vec<String>;

pub struct ToolRecipe {
    pub definition: ToolDefinition,
    /// Program to spawn; may differ from the probed executable
    /// (`cargo` for clippy)
    pub program: &'static str,
    /// Check commands; their issues are concatenated
    pub check: &'static [ArgsFn],
    /// Fix command; `None` for check-only tools
    pub fix: Option<ArgsFn>,
    pub parser: ParseFn,
    pub stream: OutputStream,
    pub target: Target,
    /// Tool-specific options, in addition to the common ones
    pub options: &'static [OptionSpec],
}

impl ToolRecipe {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Debug for ToolRecipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRecipe")
            .field("name", &self.definition.name)
            .field("program", &self.program)
            .field("target", &self.target)
            .field("can_fix", &self.fix.is_some())
            .finish()
    }
}
