//! Per-source trust policy
//!
//! Which probe deserves which tier for which component, and when a claim
//! must be demoted, is empirically derived from OS behavior and will need
//! amendment as new versions appear. It is therefore kept as plain data
//! rather than code; see [`crate::config`] for the shipped catalog.

use serde::{Deserialize, Serialize};

use crate::version::components::{Component, VersionComponents};
use crate::version::tier::{ComponentTiers, TrustTier};

/// Matches against the values known at fold time (already-accepted values
/// merged with the candidate reading)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TierCondition {
    /// Major must equal this value
    pub major: Option<u32>,
    /// Minor must equal this value
    pub minor: Option<u32>,
    /// Build must be at least this value
    pub min_build: Option<u32>,
}

impl TierCondition {
    pub fn matches(&self, known: &VersionComponents) -> bool {
        let equals = |want: Option<u32>, component: Component| {
            want.is_none_or(|value| known.get(component) == Some(value))
        };
        equals(self.major, Component::Major)
            && equals(self.minor, Component::Minor)
            && self.min_build.is_none_or(|minimum| {
                known
                    .get(Component::Build)
                    .is_some_and(|build| build >= minimum)
            })
    }
}

/// Demotes one component's claim when the condition matches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierOverride {
    pub component: Component,
    pub tier: TrustTier,
    pub when: TierCondition,
}

/// Everything the reconciler needs to know about one probe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcePolicy {
    pub name: String,
    pub priority: u8,
    pub baseline: ComponentTiers,
    #[serde(default)]
    pub overrides: Vec<TierOverride>,
}

impl SourcePolicy {
    pub fn new(name: impl Into<String>, priority: u8, baseline: ComponentTiers) -> Self {
        Self {
            name: name.into(),
            priority,
            baseline,
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, rule: TierOverride) -> Self {
        self.overrides.push(rule);
        self
    }

    /// Effective claim per component given what is already known. Overrides
    /// only ever demote the baseline; the lowest matching override wins.
    pub fn tiers_for(&self, known: &VersionComponents) -> ComponentTiers {
        let mut tiers = self.baseline;
        for rule in &self.overrides {
            if rule.when.matches(known) && rule.tier < tiers.get(rule.component) {
                tiers.set(rule.component, rule.tier);
            }
        }
        tiers
    }
}
