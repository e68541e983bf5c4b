//! The source catalog as configuration
//!
//! Priorities, baseline tiers and conditional demotions are empirical and
//! change as new OS versions appear, so the whole catalog is serde data with
//! the known-good Windows table as the default.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sources::policy::{SourcePolicy, TierCondition, TierOverride};
use crate::version::components::Component;
use crate::version::tier::{ComponentTiers, TrustTier};

/// First Windows 10 build (1903) on which kernel file metadata stopped
/// tracking the marketed build number reliably
pub const WIN10_BUILD_1903: u32 = 18_362;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog entry for one probe; the map key is the source name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceEntry {
    pub priority: u8,
    pub baseline: ComponentTiers,
    #[serde(default)]
    pub overrides: Vec<TierOverride>,
}

/// The full source catalog. Map order is preserved and breaks priority ties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetectorConfig {
    pub sources: IndexMap<String, SourceEntry>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let mut sources = IndexMap::new();
        sources.insert(
            "kernel_file".to_string(),
            SourceEntry {
                priority: 40,
                baseline: ComponentTiers::new(7, 7, 7, 7),
                overrides: vec![TierOverride {
                    component: Component::Build,
                    tier: TrustTier::new(3),
                    when: TierCondition {
                        major: Some(10),
                        minor: Some(0),
                        min_build: Some(WIN10_BUILD_1903),
                    },
                }],
            },
        );
        sources.insert(
            "wmi".to_string(),
            SourceEntry {
                priority: 30,
                baseline: ComponentTiers::new(5, 5, 5, 0),
                overrides: Vec::new(),
            },
        );
        sources.insert(
            "registry".to_string(),
            SourceEntry {
                priority: 20,
                baseline: ComponentTiers::new(3, 3, 3, 3),
                overrides: Vec::new(),
            },
        );
        sources.insert(
            "ver_command".to_string(),
            SourceEntry {
                priority: 10,
                baseline: ComponentTiers::new(2, 2, 2, 0),
                overrides: Vec::new(),
            },
        );
        Self { sources }
    }
}

impl DetectorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// The policy for one catalog entry, by name
    pub fn policy(&self, name: &str) -> Option<SourcePolicy> {
        self.sources.get(name).map(|entry| SourcePolicy {
            name: name.to_string(),
            priority: entry.priority,
            baseline: entry.baseline,
            overrides: entry.overrides.clone(),
        })
    }

    /// All policies in catalog order
    pub fn policies(&self) -> Vec<SourcePolicy> {
        self.sources
            .keys()
            .filter_map(|name| self.policy(name))
            .collect()
    }
}
