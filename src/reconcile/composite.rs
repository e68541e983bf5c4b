//! Composite version accumulator

use std::fmt;

use crate::version::components::{Component, VersionComponents};
use crate::version::tier::TrustTier;

/// The best answer accumulated across sources: a value plus the trust tier
/// it was established at, per component.
///
/// Tiers only ever increase while a run folds readings in; a component that
/// no source has supplied yet has no tier at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeVersion {
    values: VersionComponents,
    tiers: [Option<TrustTier>; 4],
}

impl CompositeVersion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A composite carrying values but no tiers, used to evaluate
    /// conditional tier rules against hypothetical state
    pub fn with_values(values: VersionComponents) -> Self {
        Self {
            values,
            tiers: [None; 4],
        }
    }

    pub fn values(&self) -> &VersionComponents {
        &self.values
    }

    pub fn value(&self, component: Component) -> Option<u32> {
        self.values.get(component)
    }

    /// Tier the component was established at; `None` until a source supplies it
    pub fn tier(&self, component: Component) -> Option<TrustTier> {
        self.tiers[component.index()]
    }

    /// Fold one candidate in. A higher tier replaces value and tier; an
    /// equal tier keeps the numerically larger value; a lower tier is
    /// ignored. An accepted value is never decreased.
    pub fn offer(&mut self, component: Component, value: u32, tier: TrustTier) {
        match self.tiers[component.index()] {
            Some(current) if tier < current => {}
            Some(current) if tier == current => {
                if self.values.get(component).is_none_or(|existing| value > existing) {
                    self.values.set(component, value);
                }
            }
            _ => {
                self.values.set(component, value);
                self.tiers[component.index()] = Some(tier);
            }
        }
    }

    /// Accepted values merged with a candidate reading's values, for
    /// evaluating conditional tier rules before the reading is folded.
    /// Accepted values win where both are present.
    pub fn preview_with(&self, candidate: &VersionComponents) -> VersionComponents {
        let mut merged = self.values;
        for component in Component::ALL {
            if merged.get(component).is_none() {
                if let Some(value) = candidate.get(component) {
                    merged.set(component, value);
                }
            }
        }
        merged
    }

    /// Render the contiguous prefix of components established at a usable
    /// tier (>= 1). A component below that truncates the string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for component in Component::ALL {
            let usable = self.tier(component).is_some_and(TrustTier::is_usable);
            match self.value(component) {
                Some(value) if usable => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(&value.to_string());
                }
                _ => break,
            }
        }
        out
    }
}

impl fmt::Display for CompositeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
