//! Stat aggregation.

pub mod profile;

pub use profile::*;
