//! Report rendering

pub mod console;
pub mod document;
pub mod formatter;
