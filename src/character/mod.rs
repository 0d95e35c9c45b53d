//! Character sheet, skills and prestige.

pub mod attributes;
pub mod prestige;
pub mod progression;
pub mod skills;

pub use attributes::*;
pub use prestige::*;
pub use progression::*;
pub use skills::*;
