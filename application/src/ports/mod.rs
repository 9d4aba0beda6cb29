//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod ai_provider;
pub mod availability;
pub mod command_runner;
pub mod progress;
pub mod sleeper;
pub mod tool_plugin;
