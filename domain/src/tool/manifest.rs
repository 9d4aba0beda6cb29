//! Tool manifest: the catalog of tools a distribution expects to be present

use serde::{Deserialize, Serialize};

use super::definition::TIER_TOOLS;

fn default_tier() -> String {
    TIER_TOOLS.to_string()
}

/// One manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTool {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_tier")]
    pub tier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub tools: Vec<ManifestTool>,
}

impl Manifest {
    /// Names of tools in any of `tiers`, in manifest order.
    ///
    /// An empty `tiers` slice selects every tool.
    pub fn names_in_tiers(&self, tiers: &[&str]) -> Vec<String> {
        self.tools
            .iter()
            .filter(|t| tiers.is_empty() || tiers.contains(&t.tier.as_str()))
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ManifestTool> {
        self.tools.iter().find(|t| t.name == name)
    }
}
