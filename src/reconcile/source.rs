//! Source abstraction for version readings

#[cfg(test)]
use mockall::automock;

use crate::reconcile::composite::CompositeVersion;
use crate::version::components::VersionComponents;
use crate::version::tier::ComponentTiers;

/// One source's answer for one reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceReading {
    /// Component values the source could supply; absent slots mean the probe
    /// had no answer for them
    pub values: VersionComponents,
    /// The source's unconditional trust claim per component
    pub tiers: ComponentTiers,
}

/// A version detection technique (WMI, kernel file metadata, `ver` output,
/// the registry).
///
/// Implementations wrap the actual OS probe; the reconciler only ever sees
/// readings and trust claims, so an unreachable probe simply answers `None`.
#[cfg_attr(test, automock)]
pub trait Source {
    /// Name used for log context
    fn name(&self) -> &str;

    /// Higher-priority sources are consulted first
    fn priority(&self) -> u8;

    /// Trust claim per component given what the run has already established.
    /// Conditional rules may demote the baseline claim; they never raise it.
    fn declared_tiers(&self, partial: &CompositeVersion) -> ComponentTiers;

    /// Obtain a reading. `None` means the probe could not answer, which is
    /// an expected outcome rather than an error.
    fn try_read(&self) -> Option<SourceReading>;
}
