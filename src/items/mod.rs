//! Equipment, item generation and drops.

pub mod drops;
pub mod equipment;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use types::*;
