//! Caller accuracy requirements

use thiserror::Error;

use crate::version::components::Component;
use crate::version::tier::TrustTier;

/// Minimum trust tier the caller demands per component; `None` means the
/// component is not required at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredTiers {
    pub major: Option<TrustTier>,
    pub minor: Option<TrustTier>,
    pub build: Option<TrustTier>,
    pub revision: Option<TrustTier>,
}

/// Inconsistent requirement combinations, rejected before any source runs
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RequirementsError {
    #[error("major and minor requirements must be supplied together")]
    UnpairedMajorMinor,

    #[error("at least one component must be required")]
    NothingRequired,

    #[error("a request without major/minor must name exactly one of build or revision")]
    AmbiguousBuildRevision,

    #[error("revision cannot be required when build is not")]
    RevisionWithoutBuild,
}

impl RequirementsError {
    /// Legacy numeric code. Values below -15 keep these distinct from the
    /// shortfall bit masks, which occupy -1..=-15.
    pub fn legacy_code(self) -> i32 {
        match self {
            RequirementsError::UnpairedMajorMinor => -16,
            RequirementsError::NothingRequired => -17,
            RequirementsError::AmbiguousBuildRevision => -18,
            RequirementsError::RevisionWithoutBuild => -19,
        }
    }
}

impl RequiredTiers {
    /// Require major and minor at the given tier
    pub fn major_minor(tier: TrustTier) -> Self {
        Self {
            major: Some(tier),
            minor: Some(tier),
            ..Self::default()
        }
    }

    /// Require major, minor and build at the given tier
    pub fn through_build(tier: TrustTier) -> Self {
        Self {
            major: Some(tier),
            minor: Some(tier),
            build: Some(tier),
            revision: None,
        }
    }

    /// Require all four components at the given tier
    pub fn full(tier: TrustTier) -> Self {
        Self {
            major: Some(tier),
            minor: Some(tier),
            build: Some(tier),
            revision: Some(tier),
        }
    }

    pub fn get(&self, component: Component) -> Option<TrustTier> {
        match component {
            Component::Major => self.major,
            Component::Minor => self.minor,
            Component::Build => self.build,
            Component::Revision => self.revision,
        }
    }

    /// Cross-component consistency rules:
    ///
    /// - major and minor are always required together
    /// - without major/minor, exactly one of build/revision must be required
    /// - revision cannot be required while build is not
    pub fn validate(&self) -> Result<(), RequirementsError> {
        if self.major.is_some() != self.minor.is_some() {
            return Err(RequirementsError::UnpairedMajorMinor);
        }
        if self.major.is_none() {
            return match (self.build, self.revision) {
                (None, None) => Err(RequirementsError::NothingRequired),
                (Some(_), Some(_)) => Err(RequirementsError::AmbiguousBuildRevision),
                _ => Ok(()),
            };
        }
        if self.build.is_none() && self.revision.is_some() {
            return Err(RequirementsError::RevisionWithoutBuild);
        }
        Ok(())
    }
}
