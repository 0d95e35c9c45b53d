//! Typed errors for the engine.
//!
//! Content-integrity problems are authoring bugs and are surfaced as soon as
//! they are detected. Invalid player operations are not errors; they are
//! no-ops on the controller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Static content is missing or malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    #[error("zone {0} has no content definition")]
    UnknownZone(u32),

    #[error("zone {0} has an empty monster pool")]
    EmptyMonsterPool(u32),

    #[error("zone {0} has no boss")]
    MissingBoss(u32),

    #[error("zone {zone_id} boss `{name}` has no hit points")]
    InvalidBoss { zone_id: u32, name: String },

    #[error("zone {0} must have a positive base difficulty")]
    InvalidDifficulty(u32),

    #[error("zone {zone_id} monster `{name}` has no hit points")]
    InvalidMonster { zone_id: u32, name: String },

    #[error("zone catalog is empty")]
    NoZones,
}

/// Balance configuration failed to parse or holds out-of-range values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse balance config")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("not enough {currency}: need {needed}, have {available}")]
    InsufficientFunds {
        currency: &'static str,
        needed: u64,
        available: u64,
    },

    #[error("{what} is already at max level {max_level}")]
    MaxLevel { what: String, max_level: u32 },

    #[error("prestige requires level {required_level} (current {current_level})")]
    PrestigeNotAvailable {
        required_level: u32,
        current_level: u32,
    },

    #[error("ability score {score} is outside the creation range {min}..={max}")]
    InvalidAbilityScore { score: i32, min: i32, max: i32 },

    #[error("no unspent ability points")]
    NoAbilityPoints,
}
