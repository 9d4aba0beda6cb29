//! Typed tool options
//!
//! Options arrive from two places: `[tools.<name>]` tables in the config file
//! and `--tool-options tool:key=value` on the command line. Both end up as a
//! [`ToolOptions`] map that a plugin validates against its [`OptionSpec`]s.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::core::error::ConfigurationError;

/// Option keys every tool adapter understands
pub const OPTION_TIMEOUT: &str = "timeout";
pub const OPTION_EXCLUDE_PATTERNS: &str = "exclude_patterns";

/// Kind of value an option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Bool,
    Int,
    /// Integer or float
    Number,
    Str,
    List,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Bool => "bool",
            OptionKind::Int => "integer",
            OptionKind::Number => "number",
            OptionKind::Str => "string",
            OptionKind::List => "list of strings",
        }
    }
}

/// A single option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Infer a value from a command-line string.
    ///
    /// `true`/`false` become booleans, numerals become numbers, and values
    /// containing `|` become lists (`E501|W291`). Everything else is a string.
    pub fn parse_cli(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "true" => return OptionValue::Bool(true),
            "false" => return OptionValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return OptionValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return OptionValue::Float(f);
        }
        if raw.contains('|') {
            return OptionValue::List(
                raw.split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        OptionValue::Str(raw.to_string())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(i) => Some(*i as f64),
            OptionValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render the value the way it would be passed as a CLI flag argument
    pub fn to_arg(&self) -> String {
        match self {
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Int(i) => i.to_string(),
            OptionValue::Float(f) => f.to_string(),
            OptionValue::Str(s) => s.clone(),
            OptionValue::List(items) => items.join(","),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

/// Declared option of a tool adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    pub const fn new(name: &'static str, kind: OptionKind) -> Self {
        Self { name, kind }
    }

    /// Coerce `value` into this option's kind, or `None` if it does not fit.
    ///
    /// Integers are accepted where numbers are expected, and a single string
    /// is accepted where a list is expected.
    pub fn coerce(&self, value: &OptionValue) -> Option<OptionValue> {
        match (self.kind, value) {
            (OptionKind::Bool, OptionValue::Bool(_))
            | (OptionKind::Int, OptionValue::Int(_))
            | (OptionKind::Number, OptionValue::Int(_) | OptionValue::Float(_))
            | (OptionKind::Str, OptionValue::Str(_))
            | (OptionKind::List, OptionValue::List(_)) => Some(value.clone()),
            (OptionKind::List, OptionValue::Str(s)) => Some(OptionValue::List(
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            )),
            (OptionKind::Str, OptionValue::Int(_) | OptionValue::Float(_)) => {
                Some(OptionValue::Str(value.to_arg()))
            }
            _ => None,
        }
    }
}

/// Options shared by every adapter
pub fn common_option_specs() -> [OptionSpec; 2] {
    [
        OptionSpec::new(OPTION_TIMEOUT, OptionKind::Number),
        OptionSpec::new(OPTION_EXCLUDE_PATTERNS, OptionKind::List),
    ]
}

/// Ordered option map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolOptions(BTreeMap<String, OptionValue>);

impl ToolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(OptionValue::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    pub fn get_list(&self, key: &str) -> &[String] {
        self.get(key).and_then(OptionValue::as_list).unwrap_or(&[])
    }

    /// The `timeout` option, if set to a positive number of seconds
    pub fn timeout(&self) -> Option<Duration> {
        self.get_f64(OPTION_TIMEOUT)
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
    }

    pub fn exclude_patterns(&self) -> &[String] {
        self.get_list(OPTION_EXCLUDE_PATTERNS)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merged(&self, other: &ToolOptions) -> ToolOptions {
        let mut out = self.clone();
        for (k, v) in &other.0 {
            out.0.insert(k.clone(), v.clone());
        }
        out
    }

    /// Validate against `specs`, returning the coerced options.
    ///
    /// Fails on the first unknown key (in key order) or kind mismatch.
    pub fn validate(&self, tool: &str, specs: &[OptionSpec]) -> Result<ToolOptions, ConfigurationError> {
        let mut out = ToolOptions::new();
        for (key, value) in &self.0 {
            let spec = specs.iter().find(|s| s.name == key).ok_or_else(|| {
                ConfigurationError::UnknownOption {
                    tool: tool.to_string(),
                    key: key.clone(),
                }
            })?;
            let coerced = spec
                .coerce(value)
                .ok_or_else(|| ConfigurationError::InvalidOptionValue {
                    tool: tool.to_string(),
                    key: key.clone(),
                    expected: spec.kind.as_str().to_string(),
                })?;
            out.0.insert(key.clone(), coerced);
        }
        Ok(out)
    }
}

impl FromIterator<(String, OptionValue)> for ToolOptions {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse `tool:key=value,tool:key=value` into per-tool option maps.
///
/// Entries without a `:` or `=` are rejected with
/// [`ConfigurationError::MalformedOption`].
pub fn parse_tool_options(raw: &str) -> Result<BTreeMap<String, ToolOptions>, ConfigurationError> {
    let mut out: BTreeMap<String, ToolOptions> = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (tool, assignment) = entry
            .split_once(':')
            .ok_or_else(|| ConfigurationError::MalformedOption(entry.to_string()))?;
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigurationError::MalformedOption(entry.to_string()))?;
        let (tool, key) = (tool.trim(), key.trim());
        if tool.is_empty() || key.is_empty() {
            return Err(ConfigurationError::MalformedOption(entry.to_string()));
        }
        out.entry(tool.to_ascii_lowercase())
            .or_default()
            .insert(key, OptionValue::parse_cli(value));
    }
    Ok(out)
}
