//! Best-effort Windows OS version detection core
//!
//! Several independent techniques can reveal the running OS version (a WMI
//! query, kernel file metadata, `cmd /c ver` output, the registry), and none
//! of them is complete or fully trustworthy on its own. This crate contains
//! the parts that combine them:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   Sources   │────▶│  Reconciler  │────▶│  Composite  │
//! │ (per probe) │     │ (tier merge) │     │  + Status   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                    ▲
//!        ▼                    │
//! ┌─────────────┐     ┌──────────────┐
//! │   Parser    │     │    Policy    │
//! │  (salvage)  │     │ (tier data)  │
//! └─────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`parser`]: flexible version-string parsing with leftover capture
//! - [`reconcile`]: multi-source merging by per-component trust tier
//! - [`sources`]: probe collaborator traits and generic source adapters
//! - [`config`]: the source catalog (priorities, tiers, conditional rules)
//! - [`version`]: shared value types
//!
//! The OS probes themselves are not part of this crate; implement
//! [`sources::providers::RawVersionProvider`] or
//! [`sources::providers::ComponentProvider`] to plug them in.

pub mod config;
pub mod parser;
pub mod reconcile;
pub mod sources;
pub mod version;
