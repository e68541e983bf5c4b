//! Per-component reconciliation outcome
//!
//! The original numeric status packed tiers and failure flags into one
//! integer with multiplier constants. Here the outcome is an explicit struct
//! and the packed integer exists only as a boundary rendering for callers
//! that still want the legacy code.

use crate::reconcile::composite::CompositeVersion;
use crate::reconcile::requirements::RequiredTiers;
use crate::version::components::Component;
use crate::version::tier::TrustTier;

/// Outcome for one component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentStatus {
    /// Tier the component was established at; `None` if no source supplied it
    pub achieved: Option<TrustTier>,
    /// True when the component was required and its achieved tier fell short
    pub shortfall: bool,
}

/// Outcome of a whole reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStatus {
    pub major: ComponentStatus,
    pub minor: ComponentStatus,
    pub build: ComponentStatus,
    pub revision: ComponentStatus,
}

impl ReconcileStatus {
    /// Judge a finished composite against the caller's minimums
    pub fn evaluate(composite: &CompositeVersion, required: &RequiredTiers) -> Self {
        let mut status = Self::default();
        for component in Component::ALL {
            let achieved = composite.tier(component);
            let shortfall = required
                .get(component)
                .is_some_and(|minimum| achieved.is_none_or(|tier| tier < minimum));
            *status.get_mut(component) = ComponentStatus { achieved, shortfall };
        }
        status
    }

    pub fn get(&self, component: Component) -> ComponentStatus {
        match component {
            Component::Major => self.major,
            Component::Minor => self.minor,
            Component::Build => self.build,
            Component::Revision => self.revision,
        }
    }

    fn get_mut(&mut self, component: Component) -> &mut ComponentStatus {
        match component {
            Component::Major => &mut self.major,
            Component::Minor => &mut self.minor,
            Component::Build => &mut self.build,
            Component::Revision => &mut self.revision,
        }
    }

    /// True when every required component reached its minimum tier
    pub fn is_success(&self) -> bool {
        self.shortfall_mask() == 0
    }

    /// Bit per shortfalled component: bit 0 major, bit 1 minor, bit 2 build,
    /// bit 3 revision
    pub fn shortfall_mask(&self) -> u8 {
        Component::ALL
            .iter()
            .enumerate()
            .filter(|&(_, &c)| self.get(c).shortfall)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    /// Legacy integer rendering: negative shortfall mask on failure,
    /// otherwise achieved tiers packed one nibble per component with major
    /// in the highest nibble
    pub fn legacy_code(&self) -> i32 {
        let mask = self.shortfall_mask();
        if mask != 0 {
            return -(mask as i32);
        }
        Component::ALL.iter().fold(0, |code, &component| {
            let tier = self.get(component).achieved.map_or(0, |t| t.get() as i32);
            (code << 4) | tier
        })
    }
}
