//! Idle Quest - incremental RPG engine library
//!
//! Stat aggregation (buildings, gear, meta upgrades, compendium, buffs) and
//! d20 combat resolution for a click-and-idle RPG. No UI and no persistence
//! format: player state is plain serde data owned by the caller.

pub mod bonuses;
pub mod buildings;
pub mod character;
pub mod combat;
pub mod core;
pub mod effects;
pub mod items;
pub mod simulator;
pub mod stats;
pub mod zones;

pub use crate::combat::{EncounterController, EncounterEvent, MonsterDeathEvent, SharedEncounter};
pub use crate::core::{BalanceConfig, ContentCatalog, EngineError, GameDice, PlayerState};
pub use crate::stats::EffectiveProfile;
