//! Generic [`Source`] adapters over probe collaborators

use tracing::debug;

use crate::parser::flexible::{self, ParseOutcome};
use crate::reconcile::composite::CompositeVersion;
use crate::reconcile::source::{Source, SourceReading};
use crate::sources::policy::SourcePolicy;
use crate::sources::providers::{ComponentProvider, RawVersionProvider};
use crate::version::components::{Component, VersionComponents};
use crate::version::tier::ComponentTiers;

/// A probe that answers with a raw string; the reading is whatever the
/// flexible parser can salvage from it
pub struct RawStringSource<P> {
    policy: SourcePolicy,
    provider: P,
}

impl<P: RawVersionProvider> RawStringSource<P> {
    pub fn new(policy: SourcePolicy, provider: P) -> Self {
        Self { policy, provider }
    }
}

impl<P: RawVersionProvider> Source for RawStringSource<P> {
    fn name(&self) -> &str {
        &self.policy.name
    }

    fn priority(&self) -> u8 {
        self.policy.priority
    }

    fn declared_tiers(&self, partial: &CompositeVersion) -> ComponentTiers {
        self.policy.tiers_for(partial.values())
    }

    fn try_read(&self) -> Option<SourceReading> {
        let raw = self.provider.fetch()?;
        let parsed = flexible::parse(&raw);
        if parsed.outcome == ParseOutcome::Unparseable {
            debug!(source = %self.policy.name, raw = %raw, "unparseable reading discarded");
            return None;
        }
        reading_from(parsed.components, &self.policy)
    }
}

/// A probe that already yields structured components
pub struct ComponentSource<P> {
    policy: SourcePolicy,
    provider: P,
}

impl<P: ComponentProvider> ComponentSource<P> {
    pub fn new(policy: SourcePolicy, provider: P) -> Self {
        Self { policy, provider }
    }
}

impl<P: ComponentProvider> Source for ComponentSource<P> {
    fn name(&self) -> &str {
        &self.policy.name
    }

    fn priority(&self) -> u8 {
        self.policy.priority
    }

    fn declared_tiers(&self, partial: &CompositeVersion) -> ComponentTiers {
        self.policy.tiers_for(partial.values())
    }

    fn try_read(&self) -> Option<SourceReading> {
        reading_from(self.provider.fetch()?, &self.policy)
    }
}

/// Keep only the components the policy has a trust claim for; a probe
/// cannot vouch for a slot its own table rates tier 0. An all-masked
/// reading counts as no reading.
fn reading_from(values: VersionComponents, policy: &SourcePolicy) -> Option<SourceReading> {
    let mut masked = VersionComponents::default();
    for component in Component::ALL {
        if policy.baseline.get(component).is_usable() {
            if let Some(value) = values.get(component) {
                masked.set(component, value);
            }
        }
    }
    if masked.is_empty() {
        return None;
    }
    Some(SourceReading {
        values: masked,
        tiers: policy.baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::providers::{MockComponentProvider, MockRawVersionProvider};
    use crate::version::tier::TrustTier;

    fn wmi_policy() -> SourcePolicy {
        SourcePolicy::new("wmi", 30, ComponentTiers::new(5, 5, 5, 0))
    }

    #[test]
    fn raw_source_parses_and_masks_unclaimed_components() {
        let mut provider = MockRawVersionProvider::new();
        provider
            .expect_fetch()
            .return_const(Some("10.0.19041.1415".to_string()));

        let source = RawStringSource::new(wmi_policy(), provider);
        let reading = source.try_read().unwrap();

        assert_eq!(reading.values.get(Component::Build), Some(19041));
        // Revision is rated tier 0 by the policy, so the probe cannot
        // vouch for it even though the string carried one.
        assert_eq!(reading.values.get(Component::Revision), None);
    }

    #[test]
    fn raw_source_salvages_dirty_strings() {
        let mut provider = MockRawVersionProvider::new();
        provider
            .expect_fetch()
            .return_const(Some("10.0.19041-rs5_release".to_string()));

        let source = RawStringSource::new(wmi_policy(), provider);
        let reading = source.try_read().unwrap();

        assert_eq!(reading.values.get(Component::Major), Some(10));
        assert_eq!(reading.values.get(Component::Build), Some(19041));
    }

    #[test]
    fn raw_source_discards_unparseable_strings() {
        let mut provider = MockRawVersionProvider::new();
        provider
            .expect_fetch()
            .return_const(Some("not a version".to_string()));

        let source = RawStringSource::new(wmi_policy(), provider);
        assert_eq!(source.try_read(), None);
    }

    #[test]
    fn raw_source_passes_provider_silence_through() {
        let mut provider = MockRawVersionProvider::new();
        provider.expect_fetch().return_const(None);

        let source = RawStringSource::new(wmi_policy(), provider);
        assert_eq!(source.try_read(), None);
    }

    #[test]
    fn component_source_masks_and_keeps_structured_values() {
        let mut provider = MockComponentProvider::new();
        provider
            .expect_fetch()
            .return_const(Some(VersionComponents::full(10, 0, 19041, 1415)));

        let policy = SourcePolicy::new("registry", 20, ComponentTiers::new(3, 3, 3, 3));
        let source = ComponentSource::new(policy, provider);
        let reading = source.try_read().unwrap();

        assert_eq!(reading.values, VersionComponents::full(10, 0, 19041, 1415));
        assert_eq!(reading.tiers.get(Component::Revision), TrustTier::new(3));
    }

    #[test]
    fn fully_masked_reading_counts_as_none() {
        let mut provider = MockComponentProvider::new();
        provider
            .expect_fetch()
            .return_const(Some(VersionComponents::from_major(10)));

        // Policy that only claims the revision; the probe answered with a
        // major it cannot vouch for.
        let policy = SourcePolicy::new("ubr", 5, ComponentTiers::new(0, 0, 0, 3));
        let source = ComponentSource::new(policy, provider);
        assert_eq!(source.try_read(), None);
    }

    #[test]
    fn declared_tiers_follow_the_policy_overrides() {
        use crate::sources::policy::{TierCondition, TierOverride};

        let policy = SourcePolicy::new("kernel_file", 40, ComponentTiers::new(7, 7, 7, 7))
            .with_override(TierOverride {
                component: Component::Build,
                tier: TrustTier::new(3),
                when: TierCondition {
                    major: Some(10),
                    minor: Some(0),
                    min_build: Some(18_362),
                },
            });
        let source = ComponentSource::new(policy, MockComponentProvider::new());

        let fresh = CompositeVersion::new();
        assert_eq!(source.declared_tiers(&fresh).get(Component::Build).get(), 7);

        let partial = CompositeVersion::with_values(VersionComponents::full(10, 0, 19_041, 0));
        assert_eq!(source.declared_tiers(&partial).get(Component::Build).get(), 3);
    }
}
