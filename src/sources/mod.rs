//! Probe collaborator traits and generic source adapters
//!
//! The actual OS probes (WMI queries, file version resources, `cmd /c ver`,
//! registry reads) live outside this crate. They plug in through the
//! [`providers`] traits; [`adapters`] wraps a provider together with a
//! [`policy::SourcePolicy`] into a full [`crate::reconcile::source::Source`].

pub mod adapters;
pub mod policy;
pub mod providers;
