//! Per-zone difficulty and reward scaling by clear count.
//!
//! A zone's clear count starts at 1 and goes up by one per boss kill, so
//! every return visit is harder and pays more.

use crate::core::config::BalanceConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneScaler {
    pub base_growth: f64,
    pub reward_growth: f64,
}

impl Default for ZoneScaler {
    fn default() -> Self {
        Self::from_config(&BalanceConfig::default())
    }
}

impl ZoneScaler {
    pub fn from_config(config: &BalanceConfig) -> Self {
        Self {
            base_growth: config.zone_growth,
            reward_growth: config.reward_growth,
        }
    }

    /// `base_growth^(clear_count - 1)`; exactly 1 on the first clear.
    pub fn difficulty_multiplier(&self, clear_count: u32) -> f64 {
        let c = clear_count.max(1);
        self.base_growth.powi((c - 1) as i32)
    }

    /// `1 + (clear_count - 1) * reward_growth`; never below 1.
    pub fn reward_multiplier(&self, clear_count: u32) -> f64 {
        let c = clear_count.max(1);
        (1.0 + (c - 1) as f64 * self.reward_growth).max(1.0)
    }

    /// Scale HP by the difficulty multiplier, flooring with a minimum of 1.
    pub fn scale_hp(&self, hp: u32, clear_count: u32) -> u32 {
        let scaled = (hp as f64 * self.difficulty_multiplier(clear_count)).floor();
        scaled.clamp(1.0, u32::MAX as f64) as u32
    }
}
