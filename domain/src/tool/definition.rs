//! Static tool metadata

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tier of general-purpose linters and formatters
pub const TIER_TOOLS: &str = "tools";
/// Tier of security scanners
pub const TIER_SECURITY: &str = "security";

/// Default subprocess timeout when a definition does not set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default priority for tools that do not care about ordering
pub const DEFAULT_PRIORITY: i32 = 50;

/// Definition of one tool adapter, fixed at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "ruff")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Whether the tool supports an auto-fix action
    pub can_fix: bool,
    /// Glob patterns of files the tool applies to (e.g., "*.py")
    pub file_patterns: Vec<String>,
    /// Execution order; lower runs first
    pub priority: i32,
    /// Grouping label ("tools", "security", ...)
    pub tier: String,
    /// Binary probed to decide whether the tool is installed
    pub executable: String,
    /// Subprocess timeout used unless overridden by the `timeout` option
    #[serde(with = "duration_secs")]
    pub default_timeout: Duration,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            executable: name.clone(),
            name,
            description: description.into(),
            can_fix: false,
            file_patterns: Vec::new(),
            priority: DEFAULT_PRIORITY,
            tier: TIER_TOOLS.to_string(),
            default_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_fix(mut self) -> Self {
        self.can_fix = true;
        self
    }

    pub fn with_patterns(mut self, patterns: &[&str]) -> Self {
        self.file_patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = tier.into();
        self
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn in_tier(&self, tier: &str) -> bool {
        self.tier == tier
    }
}

pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(secs.max(0.0)))
    }
}
