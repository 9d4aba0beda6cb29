//! Requested action

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a run should do with the selected tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Read-only analysis
    Check,
    /// Apply auto-fixes / formatting
    Fmt,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Check => "check",
            Action::Fmt => "fmt",
        }
    }

    /// Whether tools must support fixing to take part in this action
    pub fn requires_fix(&self) -> bool {
        matches!(self, Action::Fmt)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check" | "chk" => Ok(Action::Check),
            "fmt" | "format" | "fix" => Ok(Action::Fmt),
            other => Err(format!("Unknown action '{}': expected check or fmt", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!("check".parse::<Action>().unwrap(), Action::Check);
        assert_eq!("FMT".parse::<Action>().unwrap(), Action::Fmt);
        assert_eq!("format".parse::<Action>().unwrap(), Action::Fmt);
        assert!("lint".parse::<Action>().is_err());
    }

    #[test]
    fn test_requires_fix() {
        assert!(Action::Fmt.requires_fix());
        assert!(!Action::Check.requires_fix());
    }
}
