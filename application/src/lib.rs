//! Application layer for lintmux
//!
//! This crate contains the tool plugin contract, the plugin registry, the
//! use cases that select and run tools, and the AI retry protocol.
//! It depends only on the domain layer.

pub mod ports;
pub mod registry;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    ai_provider::{AiProvider, AiRequest, AiResponse},
    availability::{AssumeAvailable, ToolAvailability},
    command_runner::{CommandOutput, CommandRunner, CommandSpec, ExecutionError, SubprocessEnv},
    progress::{NoProgress, RunProgress},
    sleeper::{Sleeper, TokioSleeper},
    tool_plugin::{Checkable, Configurable, Fixable, ToolPlugin},
};
pub use registry::{PluginFactory, PluginRegistry, RegistryError, plugin_factory};
pub use retry::with_retry;
pub use use_cases::propose_fixes::ProposeFixesUseCase;
pub use use_cases::run_tools::{RunError, RunOutput, RunRequest, RunToolsUseCase};
pub use use_cases::select_tools::{Selection, SelectionError, SelectionRequest, SelectToolsUseCase};
pub use use_cases::summarize::SummarizeUseCase;
