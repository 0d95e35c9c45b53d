//! Zones: content, clear-count scaling and per-player progression.

pub mod data;
pub mod progression;
pub mod scaling;

pub use data::*;
pub use progression::*;
pub use scaling::*;
