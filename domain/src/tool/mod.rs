//! Tool domain module
//!
//! This module defines the static and per-run data of the **tool adapter
//! system**: how each external analysis tool is described, configured and
//! what one run of it produces.
//!
//! # Overview
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition │───▶│ ToolOptions  │───▶│ RunResult    │
//! │ (registry)     │    │ (validated)  │    │ (per run)    │
//! └────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolDefinition`]: name, fix capability, file patterns, priority, tier
//! - [`ToolOptions`] / [`OptionSpec`]: typed option map validated against
//!   the adapter's declared specs
//! - [`RunResult`]: outcome of one check or fix invocation
//! - [`SkippedTool`]: why a tool was left out of a run
//! - [`Action`]: `check` or `fmt`
//! - [`Manifest`]: catalog of expected tools, grouped by tier
//!
//! # Priority and tiers
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `priority` | Lower runs first; ties are broken by name |
//! | `tier` | Grouping label, `"tools"` or `"security"` for the built-in set |

pub mod action;
pub mod definition;
pub mod manifest;
pub mod options;
pub mod result;

pub use action::Action;
pub use definition::ToolDefinition;
pub use options::{OptionKind, OptionSpec, OptionValue, ToolOptions};
pub use result::{RunResult, SkippedTool};
