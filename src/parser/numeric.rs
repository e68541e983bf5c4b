//! Staged numeric parsing for digit runs
//!
//! A digit run pulled out of a version segment may be far wider than the
//! 32-bit component range. The ladder here tries each width in order and
//! reports how far it had to escalate, so the caller can clamp the component
//! and keep the spilled remainder as text.

use tracing::warn;

use crate::version::components::COMPONENT_MAX;

/// Which stage absorbed a digit run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StagedNumber {
    /// Fits the 32-bit component range
    Component(u32),
    /// Needed 64 bits
    Wide(u64),
    /// Needed arbitrary width (128 bits in practice)
    Big(u128),
    /// Past 128 bits; a floating-point approximation is the best we get
    Approx(f64),
}

impl StagedNumber {
    /// The value as a legal component, if it fits
    pub fn fits_component(&self) -> Option<u32> {
        match *self {
            StagedNumber::Component(value) => Some(value),
            _ => None,
        }
    }

    /// Amount past [`COMPONENT_MAX`], rendered as decimal text. `None` when
    /// the value fits a component.
    pub fn overflow_remainder(&self) -> Option<String> {
        match *self {
            StagedNumber::Component(_) => None,
            StagedNumber::Wide(value) => Some((value - COMPONENT_MAX as u64).to_string()),
            StagedNumber::Big(value) => Some((value - COMPONENT_MAX as u128).to_string()),
            StagedNumber::Approx(value) => Some(format!("{:.0}", value - COMPONENT_MAX as f64)),
        }
    }
}

/// Parse an all-ASCII-digit token through the width ladder.
///
/// Returns `None` only when every stage fails, which for a proven digit run
/// means the floating-point stage produced a non-finite value. That case is
/// an internal inconsistency, not bad input, and the caller degrades to
/// discarding the segment.
pub fn stage_digits(digits: &str) -> Option<StagedNumber> {
    debug_assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));

    // i32 rather than u32: the component ceiling is 2_147_483_647.
    if let Ok(value) = digits.parse::<i32>() {
        return Some(StagedNumber::Component(value as u32));
    }
    if let Ok(value) = digits.parse::<u64>() {
        return Some(StagedNumber::Wide(value));
    }
    if let Ok(value) = digits.parse::<u128>() {
        return Some(StagedNumber::Big(value));
    }
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(StagedNumber::Approx(value)),
        _ => {
            warn!(digit_count = digits.len(), "digit run exceeded every numeric stage");
            None
        }
    }
}
