//! Progression bonus providers that live outside the town and equipment:
//! meta-upgrades, compendium mastery and timed buffs.
//!
//! Each provider is independent and never reads another's output.

pub mod buffs;
pub mod compendium;
pub mod meta;

pub use buffs::*;
pub use compendium::*;
pub use meta::*;
