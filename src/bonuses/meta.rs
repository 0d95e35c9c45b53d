//! Permanent meta-upgrades bought with prestige points.
//!
//! Each upgrade is a factor `1 + level * per_level_rate`. They survive
//! prestige.

use crate::core::constants::{
    META_AUTO_SPEED, META_GLOBAL_DAMAGE, META_OFFLINE_RATE, META_QUEST_EFFICIENCY,
};
use crate::core::error::{EngineError, Result};
use crate::effects::Channel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub const META_MAX_LEVEL: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetaUpgradeId {
    GlobalDamage,
    AutoSpeed,
    QuestEfficiency,
    OfflineRate,
}

impl MetaUpgradeId {
    pub const ALL: [MetaUpgradeId; 4] = [
        MetaUpgradeId::GlobalDamage,
        MetaUpgradeId::AutoSpeed,
        MetaUpgradeId::QuestEfficiency,
        MetaUpgradeId::OfflineRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetaUpgradeId::GlobalDamage => "Global Damage",
            MetaUpgradeId::AutoSpeed => "Auto Speed",
            MetaUpgradeId::QuestEfficiency => "Quest Efficiency",
            MetaUpgradeId::OfflineRate => "Offline Rate",
        }
    }

    /// (per_level_rate, base_cost, cost_multiplier)
    fn curve(&self) -> (f64, f64, f64) {
        match self {
            MetaUpgradeId::GlobalDamage => META_GLOBAL_DAMAGE,
            MetaUpgradeId::AutoSpeed => META_AUTO_SPEED,
            MetaUpgradeId::QuestEfficiency => META_QUEST_EFFICIENCY,
            MetaUpgradeId::OfflineRate => META_OFFLINE_RATE,
        }
    }

    pub fn per_level_rate(&self) -> f64 {
        self.curve().0
    }

    /// Prestige-point cost to go from `level` to `level + 1`.
    pub fn cost(&self, level: u32) -> u64 {
        let (_, base, multiplier) = self.curve();
        (base * multiplier.powi(level as i32)).ceil() as u64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaUpgrades {
    levels: HashMap<MetaUpgradeId, u32>,
}

impl MetaUpgrades {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: MetaUpgradeId) -> u32 {
        self.levels.get(&id).copied().unwrap_or(0)
    }

    pub fn factor(&self, id: MetaUpgradeId) -> f64 {
        1.0 + self.level(id) as f64 * id.per_level_rate()
    }

    /// Meta factor for a channel; 1 for channels no upgrade targets.
    /// `AutoSpeed` scales the attack rate and `OfflineRate` is not a channel,
    /// so both are read through `factor`.
    pub fn channel_factor(&self, channel: Channel) -> f64 {
        match channel {
            Channel::ClickDamage | Channel::AutoDamage => self.factor(MetaUpgradeId::GlobalDamage),
            Channel::QuestEfficiency => self.factor(MetaUpgradeId::QuestEfficiency),
            _ => 1.0,
        }
    }

    pub fn next_cost(&self, id: MetaUpgradeId) -> Option<u64> {
        let level = self.level(id);
        (level < META_MAX_LEVEL).then(|| id.cost(level))
    }

    /// Buy one level. Returns (new_level, points_spent).
    pub fn try_purchase(
        &mut self,
        id: MetaUpgradeId,
        prestige_points: &mut u64,
    ) -> Result<(u32, u64)> {
        let cost = self.next_cost(id).ok_or_else(|| EngineError::MaxLevel {
            what: id.name().to_string(),
            max_level: META_MAX_LEVEL,
        })?;
        if *prestige_points < cost {
            return Err(EngineError::InsufficientFunds {
                currency: "prestige points",
                needed: cost,
                available: *prestige_points,
            });
        }
        *prestige_points -= cost;
        let level = self.level(id) + 1;
        self.levels.insert(id, level);
        debug!(upgrade = id.name(), level, cost, "meta upgrade purchased");
        Ok((level, cost))
    }
}
