use winver_probe::parser::flexible::{ParseOutcome, parse};
use winver_probe::version::components::{COMPONENT_MAX, Component, VersionComponents};

#[test]
fn clean_four_component_string_parses_exactly() {
    let parsed = parse("10.0.19041.1415");
    assert_eq!(parsed.outcome, ParseOutcome::ExactSuccess);
    assert_eq!(parsed.components, VersionComponents::full(10, 0, 19041, 1415));
    assert!(parsed.leftovers.is_empty());
}

#[test]
fn fifth_segment_is_excess() {
    let parsed = parse("1.2.3.4.5");
    assert_eq!(parsed.outcome, ParseOutcome::ExcessOnly);
    assert_eq!(parsed.components, VersionComponents::full(1, 2, 3, 4));
    assert_eq!(parsed.leftovers.excess, "5");
}

#[test]
fn revision_suffix_is_truncated() {
    let parsed = parse("1.2.3.4-beta3");
    assert_eq!(parsed.outcome, ParseOutcome::TruncatedAt(4));
    assert_eq!(parsed.components, VersionComponents::full(1, 2, 3, 4));
    assert_eq!(parsed.leftovers.revision, "-beta3");
}

#[test]
fn overflowing_build_clamps_and_spills() {
    let parsed = parse("1.2.2147483700.4");
    assert_eq!(parsed.outcome, ParseOutcome::TruncatedAt(3));
    assert_eq!(parsed.components.get(Component::Build), Some(COMPONENT_MAX));
    assert_eq!(parsed.components.get(Component::Revision), None);
    assert_eq!(parsed.leftovers.build, "53");
    assert_eq!(parsed.leftovers.revision, "4");
}

#[test]
fn single_segment_is_unparseable() {
    assert_eq!(parse("1").outcome, ParseOutcome::Unparseable);
}

#[test]
fn leftover_slots_are_empty_for_clean_components() {
    // The slot invariant: a leftover is non-empty only when the matching
    // component's parse was not fully clean.
    for input in ["10.0", "10.0.19041", "10.0.19041.1415", "1.2.3.4.5.6"] {
        let parsed = parse(input);
        for component in Component::ALL {
            if parsed.components.get(component).is_some() {
                assert_eq!(parsed.leftovers.slot(component), "", "input {input:?}");
            }
        }
    }
}

#[test]
fn clean_projection_reparses_to_exact_success() {
    let dirty = [
        "10.0.19041.1415",
        "6.3.9600.17415.1.2",
        "10.0.19041.1415-rs5_release",
        "1.2.2147483700.4",
        "1.2.beta.4",
    ];
    for input in dirty {
        let rendered = parse(input).components.to_string();
        let reparsed = parse(&rendered);
        assert_eq!(
            reparsed.outcome,
            ParseOutcome::ExactSuccess,
            "projection of {input:?} was {rendered:?}"
        );
        assert_eq!(reparsed.components.to_string(), rendered);
    }
}
