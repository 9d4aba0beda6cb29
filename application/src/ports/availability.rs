//! Tool availability probe
//!
//! Used by tool selection to decide whether a tool's executable exists in
//! the current environment.

pub trait ToolAvailability: Send + Sync {
    fn is_available(&self, executable: &str) -> bool;
}

impl<F> ToolAvailability for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_available(&self, executable: &str) -> bool {
        self(executable)
    }
}

/// Probe that reports every tool as installed
pub struct AssumeAvailable;

impl ToolAvailability for AssumeAvailable {
    fn is_available(&self, _executable: &str) -> bool {
        true
    }
}
