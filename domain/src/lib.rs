//! Domain layer for lintmux
//!
//! This crate contains the core types of the tool orchestration engine:
//! the normalized issue model, static tool metadata, per-tool output
//! parsers and the aggregation/reporting logic. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Issue
//!
//! Every external analysis tool reports findings in its own format. Output
//! parsers normalize those findings into [`Issue`] values, which carry a file,
//! an optional position, a rule code, a message and a canonical [`Severity`].
//!
//! ## Tool metadata
//!
//! - [`ToolDefinition`]: static description of one tool adapter (name,
//!   fix capability, file patterns, priority, tier)
//! - [`RunResult`]: outcome of running one tool once
//! - [`SkippedTool`]: a tool excluded from a run, with the reason
//!
//! ## Reporting
//!
//! [`Report`] merges per-tool results into totals and groupings, and
//! [`IssueDigest`] condenses them for consoles and AI prompts.

pub mod ai;
pub mod config;
pub mod core;
pub mod issue;
pub mod parsers;
pub mod report;
pub mod tool;

// Re-export commonly used types
pub use ai::{
    cost::{estimate_cost, format_cost, format_token_count},
    error::AiError,
    fix::FixSuggestion,
    retry::RetryPolicy,
    summary::AiSummary,
};
pub use config::OutputFormat;
pub use core::error::{ConfigurationError, UnsupportedOperation};
pub use issue::{Issue, Severity};
pub use report::{CodeGroup, DigestGroup, IssueDigest, Report, ToolTotals};
pub use tool::{
    action::Action,
    definition::{TIER_SECURITY, TIER_TOOLS, ToolDefinition},
    manifest::{Manifest, ManifestTool},
    options::{OptionKind, OptionSpec, OptionValue, ToolOptions},
    result::{FailureKind, RunResult, SkippedTool, ToolFailure},
};
