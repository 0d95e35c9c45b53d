//! Town buildings: per-level channel effects with cross-building synergies.
//!
//! Buildings are bought with gold and reset to level 0 on prestige.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
