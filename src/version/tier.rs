//! Trust tiers
//!
//! A tier scores how resistant to tampering a source's reading of one
//! component is: 0 means no claim at all, 7 is the most authoritative
//! (e.g. kernel file metadata on an unmodified system).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::version::components::Component;

/// Raised when deserializing a tier outside `0..=7`
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("trust tier {0} is out of range 0..=7")]
pub struct TierOutOfRange(pub u8);

/// Trust score for one component reading, `0..=7`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrustTier(u8);

impl TrustTier {
    /// No claim
    pub const UNKNOWN: TrustTier = TrustTier(0);
    /// Most tamper-resistant
    pub const MAX: TrustTier = TrustTier(7);

    /// Build a tier, saturating at [`TrustTier::MAX`]
    pub const fn new(raw: u8) -> Self {
        if raw > 7 { TrustTier(7) } else { TrustTier(raw) }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// A tier below 1 cannot back a rendered component
    pub const fn is_usable(self) -> bool {
        self.0 >= 1
    }
}

impl TryFrom<u8> for TrustTier {
    type Error = TierOutOfRange;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        if raw <= 7 {
            Ok(TrustTier(raw))
        } else {
            Err(TierOutOfRange(raw))
        }
    }
}

impl From<TrustTier> for u8 {
    fn from(tier: TrustTier) -> u8 {
        tier.0
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tier per component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentTiers {
    pub major: TrustTier,
    pub minor: TrustTier,
    pub build: TrustTier,
    pub revision: TrustTier,
}

impl ComponentTiers {
    pub fn new(major: u8, minor: u8, build: u8, revision: u8) -> Self {
        Self {
            major: TrustTier::new(major),
            minor: TrustTier::new(minor),
            build: TrustTier::new(build),
            revision: TrustTier::new(revision),
        }
    }

    /// The same tier for every component
    pub fn uniform(tier: TrustTier) -> Self {
        Self {
            major: tier,
            minor: tier,
            build: tier,
            revision: tier,
        }
    }

    pub fn get(&self, component: Component) -> TrustTier {
        match component {
            Component::Major => self.major,
            Component::Minor => self.minor,
            Component::Build => self.build,
            Component::Revision => self.revision,
        }
    }

    pub fn set(&mut self, component: Component, tier: TrustTier) {
        match component {
            Component::Major => self.major = tier,
            Component::Minor => self.minor = tier,
            Component::Build => self.build = tier,
            Component::Revision => self.revision = tier,
        }
    }
}
