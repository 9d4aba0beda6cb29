//! Presentation layer for lintmux
//!
//! This crate contains CLI definitions, output formatters and
//! progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ListArgs, OutputFormatArg, RunArgs};
pub use output::console::ConsoleFormatter;
pub use output::document::write_report_file;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
