//! Availability probes
//!
//! - [`PathAvailability`]: tool binaries, looked up on `PATH` once each
//! - [`AvailabilityCache`]: AI providers, decided once from their API key

use lintmux_application::ToolAvailability;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Probes tool executables with `which`, memoizing each answer
#[derive(Default)]
pub struct PathAvailability {
    cache: Mutex<HashMap<String, bool>>,
}

impl PathAvailability {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToolAvailability for PathAvailability {
    fn is_available(&self, executable: &str) -> bool {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *cache.entry(executable.to_string()).or_insert_with(|| {
            let found = which::which(executable).is_ok();
            debug!(executable, found, "Probed tool binary");
            found
        })
    }
}

/// Environment variable holding each known provider's API key
pub const PROVIDER_KEY_VARS: &[(&str, &str)] = &[
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("openai", "OPENAI_API_KEY"),
];

/// Per-provider availability, computed once and kept until [`reset`](Self::reset).
///
/// A provider is available when its API key variable is set and non-empty.
/// Unknown providers are never available.
pub struct AvailabilityCache {
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
    cache: Mutex<HashMap<String, bool>>,
}

impl AvailabilityCache {
    /// Reads API keys from the process environment
    pub fn from_env() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_available(&self, provider: &str) -> bool {
        let provider = provider.to_ascii_lowercase();
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(&known) = cache.get(&provider) {
            return known;
        }
        let available = key_var(&provider)
            .and_then(|var| (self.lookup)(var))
            .is_some_and(|value| !value.trim().is_empty());
        debug!(provider = %provider, available, "AI provider availability");
        cache.insert(provider, available);
        available
    }

    pub fn reset(&self) {
        match self.cache.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

pub fn key_var(provider: &str) -> Option<&'static str> {
    PROVIDER_KEY_VARS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, var)| *var)
}
