//! Spawns monster and boss instances from zone content.

use super::monster::MonsterInstance;
use crate::core::config::BalanceConfig;
use crate::core::content::ContentCatalog;
use crate::core::dice::Dice;
use crate::core::error::ContentError;
use crate::zones::ZoneScaler;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MonsterFactory {
    content: ContentCatalog,
    scaler: ZoneScaler,
    boss_hp_multiplier: f64,
    affix_chance: f64,
    affix_min_zone: u32,
    next_instance_id: u64,
}

impl MonsterFactory {
    pub fn new(content: ContentCatalog, config: &BalanceConfig) -> Self {
        Self {
            content,
            scaler: ZoneScaler::from_config(config),
            boss_hp_multiplier: config.boss_hp_multiplier,
            affix_chance: config.clamp_chance(config.affix_chance),
            affix_min_zone: config.affix_min_zone,
            next_instance_id: 1,
        }
    }

    pub fn content(&self) -> &ContentCatalog {
        &self.content
    }

    pub fn scaler(&self) -> &ZoneScaler {
        &self.scaler
    }

    /// Create a fresh monster (or boss) for a zone at a given clear count.
    ///
    /// HP: `ceil(base_hp * base_difficulty [* boss_hp_multiplier])`, then
    /// scaled by the clear-count difficulty (floor, min 1), then by the
    /// affix HP multiplier if one rolled (floor, min 1).
    pub fn spawn(
        &mut self,
        zone_id: u32,
        is_boss: bool,
        clear_count: u32,
        dice: &mut impl Dice,
    ) -> Result<MonsterInstance, ContentError> {
        let zone = self.content.zones.require(zone_id)?;

        let (name, base_hp, armor_class, traits) = if is_boss {
            let boss = zone.boss.as_ref().ok_or(ContentError::MissingBoss(zone_id))?;
            let hp = (boss.hp as f64 * zone.base_difficulty * self.boss_hp_multiplier).ceil();
            (boss.name.clone(), hp, boss.armor_class, Some(boss.traits.clone()))
        } else {
            if zone.pool.is_empty() {
                return Err(ContentError::EmptyMonsterPool(zone_id));
            }
            let entry = &zone.pool[dice.pick_index(zone.pool.len())];
            let hp = (entry.hp as f64 * zone.base_difficulty).ceil();
            (entry.name.clone(), hp, entry.armor_class, None)
        };

        let base_hp = base_hp.clamp(1.0, u32::MAX as f64) as u32;
        let mut max_hp = self.scaler.scale_hp(base_hp, clear_count);

        let affix = if !is_boss
            && zone_id >= self.affix_min_zone
            && !self.content.affixes.is_empty()
            && dice.succeeds(self.affix_chance)
        {
            let affix = self.content.affixes[dice.pick_index(self.content.affixes.len())].clone();
            if let Some(mult) = affix.hp_multiplier {
                max_hp = (max_hp as f64 * mult).floor().clamp(1.0, u32::MAX as f64) as u32;
            }
            Some(affix)
        } else {
            None
        };

        let instance_id = self.next_instance_id;
        self.next_instance_id += 1;

        let monster = MonsterInstance {
            instance_id,
            zone_id,
            name,
            max_hp,
            current_hp: max_hp,
            armor_class,
            affix,
            boss: traits,
            rewarded: false,
        };
        debug!(
            instance_id,
            zone_id,
            name = %monster.display_name(),
            hp = max_hp,
            is_boss,
            "monster spawned"
        );
        Ok(monster)
    }
}
