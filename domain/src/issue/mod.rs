//! Normalized issue model
//!
//! Every finding produced by an external tool ends up as an [`Issue`]. The
//! parsers in [`crate::parsers`] create them; aggregation attaches the
//! originating tool name via [`Issue::with_tool`], which returns a new value
//! instead of mutating the original.

mod entities;
mod severity;

pub use entities::Issue;
pub use severity::Severity;
