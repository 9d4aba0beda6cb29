//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod propose_fixes;
pub mod run_tools;
pub mod select_tools;
pub mod summarize;
