//! Monsters, attack resolution and the encounter loop.

pub mod encounter;
pub mod factory;
pub mod monster;
pub mod resolver;
pub mod rewards;
pub mod shared;

pub use encounter::*;
pub use factory::*;
pub use monster::*;
pub use resolver::*;
pub use rewards::*;
pub use shared::*;
