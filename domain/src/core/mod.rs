//! Core domain concepts shared across all subdomains.
//!
//! - [`error`]: configuration and capability errors raised by tool adapters
//! - [`text`]: small text helpers shared by parsers and reporting

pub mod error;
pub mod text;
