//! Shared value types for four-component versions and trust tiers

pub mod components;
pub mod tier;
