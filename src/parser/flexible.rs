//! Right-to-left salvage parsing of version strings
//!
//! OS probes hand back strings like `"10.0.19041.1415"` on a good day and
//! `"10.0.19041.1415-rs5_release"` or `"6.3.9600.17415.1.2"` on a bad one.
//! [`parse`] first tries a strict read; when that fails it walks the
//! segments right to left, closes off as much errant suffix as necessary,
//! and reports exactly which text could not be absorbed.

use tracing::warn;

use crate::parser::numeric::stage_digits;
use crate::version::components::{COMPONENT_MAX, Component, VersionComponents};

/// How a flexible parse ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every segment parsed cleanly into 2-4 components
    ExactSuccess,
    /// Components are valid up to the named 1-based position; that position's
    /// segment and everything right of it went into the leftovers
    TruncatedAt(u8),
    /// The first four segments parsed cleanly; only segments past the
    /// four-component limit were set aside
    ExcessOnly,
    /// No usable version prefix was found
    Unparseable,
}

/// Text that could not be absorbed into numeric components.
///
/// A per-component slot is non-empty only when that component's segment did
/// not parse cleanly; `excess` holds the dot-joined segments past the
/// four-component limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeftoverCapture {
    pub major: String,
    pub minor: String,
    pub build: String,
    pub revision: String,
    pub excess: String,
}

impl LeftoverCapture {
    pub fn is_empty(&self) -> bool {
        self.major.is_empty()
            && self.minor.is_empty()
            && self.build.is_empty()
            && self.revision.is_empty()
            && self.excess.is_empty()
    }

    pub fn slot(&self, component: Component) -> &str {
        match component {
            Component::Major => &self.major,
            Component::Minor => &self.minor,
            Component::Build => &self.build,
            Component::Revision => &self.revision,
        }
    }

    fn slot_mut(&mut self, component: Component) -> &mut String {
        match component {
            Component::Major => &mut self.major,
            Component::Minor => &mut self.minor,
            Component::Build => &mut self.build,
            Component::Revision => &mut self.revision,
        }
    }
}

/// Result of a flexible parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub outcome: ParseOutcome,
    /// Best-effort components; empty when [`ParseOutcome::Unparseable`]
    pub components: VersionComponents,
    pub leftovers: LeftoverCapture,
}

impl ParsedVersion {
    fn unparseable() -> Self {
        Self {
            outcome: ParseOutcome::Unparseable,
            components: VersionComponents::default(),
            leftovers: LeftoverCapture::default(),
        }
    }
}

/// Parse a dot-delimited version string, salvaging what can be salvaged.
///
/// Only decimal ASCII digits are recognized; locale-specific numerics are
/// never consulted. This function does not fail: every input maps to a
/// [`ParsedVersion`], with [`ParseOutcome::Unparseable`] as the floor.
pub fn parse(input: &str) -> ParsedVersion {
    // Fast path: the whole string is already a clean 2-4 component version.
    if let Some(components) = parse_strict(input) {
        return ParsedVersion {
            outcome: ParseOutcome::ExactSuccess,
            components,
            leftovers: LeftoverCapture::default(),
        };
    }

    let segments: Vec<&str> = input.split('.').collect();
    if segments.len() < 2 {
        // A version needs at least major and minor.
        return ParsedVersion::unparseable();
    }

    // Segments past the four-component limit are set aside wholesale. When
    // the head is otherwise clean that is the only problem.
    let mut excess = String::new();
    if segments.len() > 4 {
        excess = segments[4..].join(".");
        if let Some(components) = parse_strict(&segments[..4].join(".")) {
            return ParsedVersion {
                outcome: ParseOutcome::ExcessOnly,
                components,
                leftovers: LeftoverCapture {
                    excess,
                    ..LeftoverCapture::default()
                },
            };
        }
    }

    let segments = &segments[..segments.len().min(4)];

    // Right-to-left: find the right-most segment whose left neighbors form a
    // clean version, absorb what digits it offers, and shunt the rest into
    // leftover slots.
    for k in (1..segments.len()).rev() {
        if let Some(parsed) = salvage_at(segments, k, &excess) {
            return parsed;
        }
    }

    ParsedVersion::unparseable()
}

/// Try to close the version off at segment `k` (0-based).
///
/// Returns `None` when `k` is not a viable truncation point, telling the
/// caller to keep scanning left.
fn salvage_at(segments: &[&str], k: usize, excess: &str) -> Option<ParsedVersion> {
    // Everything left of the offending segment must already be clean. A lone
    // leading segment is not a version by itself; it is validated below,
    // once we know what (if anything) extends it.
    if k >= 2 && parse_strict(&segments[..k].join(".")).is_none() {
        return None;
    }

    let offending = segments[k];
    let digit_len = offending
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let (digits, trailing) = offending.split_at(digit_len);

    // What value (if any) segment k contributes, and what text it leaves
    // behind in its slot.
    let (absorbed, slot_text) = if digits.is_empty() {
        (None, offending.to_string())
    } else {
        match stage_digits(digits) {
            Some(staged) => match staged.fits_component() {
                Some(value) => (Some(value), trailing.to_string()),
                None => {
                    // Clamp to the ceiling; the spilled amount stays as text.
                    let remainder = staged.overflow_remainder().unwrap_or_default();
                    (Some(COMPONENT_MAX), format!("{remainder}{trailing}"))
                }
            },
            None => {
                // A proven digit run the ladder could not absorb. Degrade to
                // discarding the segment instead of failing the parse.
                warn!(segment = offending, "numeric staging failed on a digit run");
                (None, offending.to_string())
            }
        }
    };

    let components = match absorbed {
        // Re-parsing the prefix with the absorbed value attached cannot fail
        // for k >= 2; for k == 1 it is what proves the lone leading segment
        // is itself a clean component.
        Some(value) => parse_strict(&format!("{}.{}", segments[..k].join("."), value))?,
        None if k == 1 => VersionComponents::from_major(parse_component(segments[0])?),
        None => parse_strict(&segments[..k].join("."))?,
    };

    let mut leftovers = LeftoverCapture {
        excess: excess.to_string(),
        ..LeftoverCapture::default()
    };
    *leftovers.slot_mut(Component::ALL[k]) = slot_text;
    for (i, segment) in segments.iter().enumerate().skip(k + 1) {
        *leftovers.slot_mut(Component::ALL[i]) = (*segment).to_string();
    }

    Some(ParsedVersion {
        outcome: ParseOutcome::TruncatedAt(k as u8 + 1),
        components,
        leftovers,
    })
}

/// Strict parse: 2-4 dot segments, each a clean in-range decimal run
fn parse_strict(input: &str) -> Option<VersionComponents> {
    let segments: Vec<&str> = input.split('.').collect();
    if !(2..=4).contains(&segments.len()) {
        return None;
    }
    let mut components = VersionComponents::default();
    for (i, segment) in segments.iter().enumerate() {
        components.set(Component::ALL[i], parse_component(segment)?);
    }
    Some(components)
}

/// A clean component token: non-empty ASCII digits within the 32-bit
/// component range
fn parse_component(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // i32 bounds the value at the component ceiling.
    segment.parse::<i32>().ok().map(|value| value as u32)
}
