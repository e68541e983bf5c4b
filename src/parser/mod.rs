//! Flexible version-string parsing
//!
//! Converts an arbitrary dot-delimited string into a best-effort four
//! component version, tolerating non-numeric suffixes, excess components and
//! numeric overflow, while reporting exactly what had to be discarded.
//!
//! # Modules
//!
//! - [`flexible`]: the right-to-left salvage parser
//! - [`numeric`]: the staged numeric parse ladder for overflowing digit runs

pub mod flexible;
pub mod numeric;
