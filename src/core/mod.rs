//! Core engine plumbing: balance constants, configuration, errors, dice and
//! the player state container.

pub mod config;
pub mod constants;
pub mod content;
pub mod dice;
pub mod error;
pub mod game_state;

pub use config::BalanceConfig;
pub use content::ContentCatalog;
pub use dice::{Dice, GameDice, RngDice, ScriptedDice};
pub use error::{ConfigError, ContentError, EngineError, Result};
pub use game_state::{PlayerState, Wallet};
