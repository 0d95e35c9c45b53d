//! Stat channels and the add/multiply effect algebra shared by every bonus
//! source.

pub mod algebra;
pub mod types;

pub use algebra::*;
pub use types::*;
