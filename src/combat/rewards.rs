//! Kill rewards.

use super::monster::MonsterInstance;
use crate::core::config::BalanceConfig;
use crate::effects::{Channel, ChannelMap};
use crate::zones::{ZoneDef, ZoneScaler};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillRewards {
    pub xp: u64,
    pub gold: u64,
    pub materials: u64,
}

fn percent_factor(percent: f64) -> f64 {
    (1.0 + percent / 100.0).max(0.0)
}

/// Rewards for killing `monster` in `zone` at `clear_count`.
///
/// * xp = base_xp * boss * reward_mult * (1 + XpBonus%)
/// * gold = base_gold * boss * reward_mult * affix_gold * (1 + GoldBonus%)
/// * materials = (base_materials + affix_materials) * (1 + MaterialBonus%)
pub fn compute_rewards(
    zone: &ZoneDef,
    monster: &MonsterInstance,
    clear_count: u32,
    boosted: &ChannelMap,
    scaler: &ZoneScaler,
    config: &BalanceConfig,
) -> KillRewards {
    let boss_mult = if monster.is_boss() {
        config.boss_reward_multiplier
    } else {
        1.0
    };
    let reward_mult = scaler.reward_multiplier(clear_count);

    let xp = zone.base_xp as f64
        * boss_mult
        * reward_mult
        * percent_factor(boosted.get(Channel::XpBonus));
    let gold = zone.base_gold as f64
        * boss_mult
        * reward_mult
        * monster.gold_multiplier()
        * percent_factor(boosted.get(Channel::GoldBonus));
    let materials = (zone.base_materials + monster.material_bonus()) as f64
        * percent_factor(boosted.get(Channel::MaterialBonus));

    KillRewards {
        xp: xp.floor() as u64,
        gold: gold.floor() as u64,
        materials: materials.floor() as u64,
    }
}
