//! The reconciliation loop

use tracing::debug;

use crate::reconcile::composite::CompositeVersion;
use crate::reconcile::requirements::{RequiredTiers, RequirementsError};
use crate::reconcile::source::Source;
use crate::reconcile::status::ReconcileStatus;
use crate::version::components::Component;

/// Final answer of a reconciliation run.
///
/// A shortfall is reported in [`ReconcileStatus`], not as an error: the
/// best-effort composite is still returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub composite: CompositeVersion,
    pub status: ReconcileStatus,
}

impl ReconcileReport {
    /// The composite rendered per the tier-gated contiguity rule
    pub fn version_string(&self) -> String {
        self.composite.render()
    }
}

/// Consult sources in priority order and fold their readings into one
/// composite version.
///
/// Sources run strictly one after another: whether a lower-priority source
/// is worth invoking at all depends on the accuracy the sources before it
/// already achieved, so concurrent invocation within a run is not supported.
/// Only malformed `required` fails; an unavailable source is absorbed as a
/// `None` reading.
pub fn reconcile(
    sources: &[&dyn Source],
    required: &RequiredTiers,
) -> Result<ReconcileReport, RequirementsError> {
    required.validate()?;

    let mut ordered: Vec<&dyn Source> = sources.to_vec();
    ordered.sort_by_key(|source| std::cmp::Reverse(source.priority()));

    let mut composite = CompositeVersion::new();

    for source in ordered {
        let claims = source.declared_tiers(&composite);

        // Invoking a probe can be expensive (WMI, process spawn); skip it
        // when nothing it could supply would improve what is already known.
        let improvable = Component::ALL.iter().any(|&component| {
            let claim = claims.get(component);
            claim.is_usable()
                && composite
                    .tier(component)
                    .is_none_or(|achieved| achieved < claim)
        });
        if !improvable {
            debug!(source = source.name(), "skipped, cannot improve any component");
            continue;
        }

        let Some(reading) = source.try_read() else {
            debug!(source = source.name(), "no reading available");
            continue;
        };

        // Conditional tier rules get to see the reading's own candidate
        // values, so a source can demote itself based on what it just read.
        let preview = composite.preview_with(&reading.values);
        let conditional = source.declared_tiers(&CompositeVersion::with_values(preview));

        for component in Component::ALL {
            let Some(value) = reading.values.get(component) else {
                continue;
            };
            let effective = reading.tiers.get(component).min(conditional.get(component));
            composite.offer(component, value, effective);
        }
        debug!(source = source.name(), composite = %composite, "reading folded");
    }

    let status = ReconcileStatus::evaluate(&composite, required);
    Ok(ReconcileReport { composite, status })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::source::SourceReading;
    use crate::version::components::VersionComponents;
    use crate::version::tier::{ComponentTiers, TrustTier};
    use std::cell::Cell;

    /// Scripted source with a fixed claim and an invocation counter
    struct StubSource {
        name: &'static str,
        priority: u8,
        tiers: ComponentTiers,
        reading: Option<VersionComponents>,
        reads: Cell<usize>,
    }

    impl StubSource {
        fn new(
            name: &'static str,
            priority: u8,
            tiers: ComponentTiers,
            reading: Option<VersionComponents>,
        ) -> Self {
            Self {
                name,
                priority,
                tiers,
                reading,
                reads: Cell::new(0),
            }
        }
    }

    impl Source for StubSource {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn declared_tiers(&self, _partial: &CompositeVersion) -> ComponentTiers {
            self.tiers
        }

        fn try_read(&self) -> Option<SourceReading> {
            self.reads.set(self.reads.get() + 1);
            self.reading.map(|values| SourceReading {
                values,
                tiers: self.tiers,
            })
        }
    }

    fn require_nothing_much() -> RequiredTiers {
        RequiredTiers::major_minor(TrustTier::new(1))
    }

    #[test]
    fn invalid_requirements_fail_before_any_source_runs() {
        let source = StubSource::new(
            "wmi",
            30,
            ComponentTiers::new(5, 5, 5, 0),
            Some(VersionComponents::full(10, 0, 19041, 0)),
        );
        let result = reconcile(&[&source], &RequiredTiers::default());
        assert_eq!(result.unwrap_err(), RequirementsError::NothingRequired);
        assert_eq!(source.reads.get(), 0);
    }

    #[test]
    fn priority_decides_order_not_slice_position() {
        let first = StubSource::new(
            "kernel_file",
            40,
            ComponentTiers::new(5, 5, 5, 5),
            Some(VersionComponents::full(10, 0, 19041, 1415)),
        );
        let second = StubSource::new(
            "wmi",
            30,
            ComponentTiers::new(5, 5, 5, 5),
            Some(VersionComponents::full(6, 1, 7601, 0)),
        );
        // Slice order deliberately reversed; priority decides.
        let report = reconcile(&[&second, &first], &require_nothing_much()).unwrap();
        assert_eq!(report.version_string(), "10.0.19041.1415");
    }

    #[test]
    fn redundant_source_is_skipped_entirely() {
        let strong = StubSource::new(
            "kernel_file",
            40,
            ComponentTiers::new(7, 7, 7, 7),
            Some(VersionComponents::full(10, 0, 19041, 1415)),
        );
        let weak = StubSource::new(
            "ver_command",
            10,
            ComponentTiers::new(2, 2, 2, 0),
            Some(VersionComponents::full(6, 1, 7601, 0)),
        );
        let report = reconcile(&[&strong, &weak], &require_nothing_much()).unwrap();
        assert_eq!(report.version_string(), "10.0.19041.1415");
        assert_eq!(weak.reads.get(), 0);
    }

    #[test]
    fn unavailable_source_is_absorbed_silently() {
        let broken = StubSource::new("wmi", 30, ComponentTiers::new(5, 5, 5, 0), None);
        let fallback = StubSource::new(
            "registry",
            20,
            ComponentTiers::new(3, 3, 3, 3),
            Some(VersionComponents::full(10, 0, 19041, 1415)),
        );
        let report = reconcile(&[&broken, &fallback], &require_nothing_much()).unwrap();
        assert_eq!(report.version_string(), "10.0.19041.1415");
        assert!(report.status.is_success());
    }

    #[test]
    fn lower_tier_source_fills_gaps_without_degrading() {
        let wmi = StubSource::new(
            "wmi",
            30,
            ComponentTiers::new(5, 5, 5, 0),
            Some({
                let mut v = VersionComponents::from_major(10);
                v.set(Component::Minor, 0);
                v.set(Component::Build, 19041);
                v
            }),
        );
        let registry = StubSource::new(
            "registry",
            20,
            ComponentTiers::new(3, 3, 3, 3),
            Some(VersionComponents::full(6, 1, 7601, 1415)),
        );
        let report = reconcile(&[&wmi, &registry], &require_nothing_much()).unwrap();
        // Registry only contributes the revision the stronger source lacked.
        assert_eq!(report.version_string(), "10.0.19041.1415");
        assert_eq!(
            report.composite.tier(Component::Revision),
            Some(TrustTier::new(3))
        );
    }

    #[test]
    fn achieved_tiers_never_exceed_the_best_single_claim() {
        let a = StubSource::new(
            "wmi",
            30,
            ComponentTiers::new(5, 5, 5, 0),
            Some(VersionComponents::full(10, 0, 19041, 0)),
        );
        let b = StubSource::new(
            "registry",
            20,
            ComponentTiers::new(3, 3, 3, 3),
            Some(VersionComponents::full(10, 0, 19041, 1415)),
        );
        let report = reconcile(&[&a, &b], &require_nothing_much()).unwrap();
        for component in Component::ALL {
            let best = a.tiers.get(component).max(b.tiers.get(component));
            let achieved = report.composite.tier(component).unwrap();
            assert!(achieved <= best, "{} overshot", component.as_str());
        }
    }

    #[test]
    fn shortfall_is_reported_with_a_best_effort_composite() {
        let weak = StubSource::new(
            "ver_command",
            10,
            ComponentTiers::new(2, 2, 2, 0),
            Some(VersionComponents::full(10, 0, 19041, 0)),
        );
        let required = RequiredTiers::major_minor(TrustTier::new(5));
        let report = reconcile(&[&weak], &required).unwrap();
        assert!(!report.status.is_success());
        assert_eq!(report.status.shortfall_mask(), 0b0011);
        assert_eq!(report.status.legacy_code(), -3);
        // The weak answer is still there for callers that want it.
        assert_eq!(report.version_string(), "10.0.19041");
    }

    #[test]
    fn required_component_no_source_supplies_is_flagged_exactly() {
        let wmi = StubSource::new(
            "wmi",
            30,
            ComponentTiers::new(5, 5, 5, 0),
            Some({
                let mut v = VersionComponents::from_major(10);
                v.set(Component::Minor, 0);
                v.set(Component::Build, 19041);
                v
            }),
        );
        let required = RequiredTiers::full(TrustTier::new(1));
        let report = reconcile(&[&wmi], &required).unwrap();
        assert_eq!(report.status.shortfall_mask(), 0b1000);
        assert_eq!(report.status.legacy_code(), -8);
    }
}
