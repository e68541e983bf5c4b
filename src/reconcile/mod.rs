//! Multi-source version reconciliation
//!
//! Each detection technique yields a partial reading with a per-component
//! trust tier. The reconciler runs the sources in priority order, keeps the
//! highest-tier value seen per component, and reports the achieved tiers
//! against the caller's minimums.
//!
//! # Modules
//!
//! - [`source`]: the [`source::Source`] trait and per-invocation readings
//! - [`composite`]: the monotonic accumulator of values and tiers
//! - [`requirements`]: caller minimums and their consistency rules
//! - [`status`]: the per-component outcome and its legacy integer rendering
//! - [`reconciler`]: the reconciliation loop itself

pub mod composite;
pub mod reconciler;
pub mod requirements;
pub mod source;
pub mod status;
