//! Balance configuration.
//!
//! Every tunable number in the engine lives here. Missing fields fall back to
//! the values in `constants`, so a partial JSON document is valid.

use super::constants::*;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub zone_growth: f64,
    pub reward_growth: f64,
    pub boss_hp_multiplier: f64,
    pub boss_reward_multiplier: f64,
    pub boss_timer_seconds: f64,
    pub affix_chance: f64,
    pub affix_min_zone: u32,
    pub base_damage: f64,
    pub damage_per_level: f64,
    pub modifier_scale_per_level: f64,
    pub crit_multiplier: f64,
    pub min_chance: f64,
    pub max_chance: f64,
    pub base_auto_attacks_per_second: f64,
    pub max_auto_attacks_per_tick: u32,
    pub normal_drop_chance: f64,
    pub boss_drop_chance: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            zone_growth: ZONE_DIFFICULTY_GROWTH,
            reward_growth: ZONE_REWARD_GROWTH,
            boss_hp_multiplier: BOSS_HP_MULTIPLIER,
            boss_reward_multiplier: BOSS_REWARD_MULTIPLIER,
            boss_timer_seconds: BOSS_TIMER_SECONDS,
            affix_chance: AFFIX_CHANCE,
            affix_min_zone: AFFIX_MIN_ZONE,
            base_damage: BASE_DAMAGE,
            damage_per_level: DAMAGE_PER_LEVEL,
            modifier_scale_per_level: MODIFIER_SCALE_PER_LEVEL,
            crit_multiplier: CRIT_MULTIPLIER,
            min_chance: MIN_CHANCE,
            max_chance: MAX_CHANCE,
            base_auto_attacks_per_second: BASE_AUTO_ATTACKS_PER_SECOND,
            max_auto_attacks_per_tick: MAX_AUTO_ATTACKS_PER_TICK,
            normal_drop_chance: NORMAL_DROP_CHANCE,
            boss_drop_chance: BOSS_DROP_CHANCE,
        }
    }
}

impl BalanceConfig {
    /// Parse and validate a JSON balance document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BalanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("zone_growth", self.zone_growth),
            ("reward_growth", self.reward_growth),
            ("boss_hp_multiplier", self.boss_hp_multiplier),
            ("boss_reward_multiplier", self.boss_reward_multiplier),
            ("boss_timer_seconds", self.boss_timer_seconds),
            ("affix_chance", self.affix_chance),
            ("base_damage", self.base_damage),
            ("damage_per_level", self.damage_per_level),
            ("modifier_scale_per_level", self.modifier_scale_per_level),
            ("crit_multiplier", self.crit_multiplier),
            ("min_chance", self.min_chance),
            ("max_chance", self.max_chance),
            ("base_auto_attacks_per_second", self.base_auto_attacks_per_second),
            ("normal_drop_chance", self.normal_drop_chance),
            ("boss_drop_chance", self.boss_drop_chance),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange {
                    field,
                    reason: "must be a finite number",
                });
            }
        }
        if self.zone_growth <= 2.0 {
            return Err(ConfigError::OutOfRange {
                field: "zone_growth",
                reason: "must be greater than 2",
            });
        }
        if self.reward_growth < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "reward_growth",
                reason: "must not be negative",
            });
        }
        if !(0.0..=1.0).contains(&self.min_chance)
            || !(0.0..=1.0).contains(&self.max_chance)
            || self.min_chance >= self.max_chance
        {
            return Err(ConfigError::OutOfRange {
                field: "min_chance/max_chance",
                reason: "need 0 <= min_chance < max_chance <= 1",
            });
        }
        let multipliers = [
            ("boss_hp_multiplier", self.boss_hp_multiplier),
            ("boss_reward_multiplier", self.boss_reward_multiplier),
            ("crit_multiplier", self.crit_multiplier),
            ("boss_timer_seconds", self.boss_timer_seconds),
        ];
        for (field, value) in multipliers {
            if value <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    reason: "must be positive",
                });
            }
        }
        if self.base_auto_attacks_per_second < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "base_auto_attacks_per_second",
                reason: "must not be negative",
            });
        }
        if self.max_auto_attacks_per_tick == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_auto_attacks_per_tick",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Clamp a player-facing probability into `[min_chance, max_chance]`.
    pub fn clamp_chance(&self, p: f64) -> f64 {
        p.clamp(self.min_chance, self.max_chance)
    }
}
