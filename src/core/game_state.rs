//! Player state container read by the stat aggregator and mutated by the
//! encounter controller.

use super::content::ContentCatalog;
use crate::bonuses::{ActiveBuffs, Compendium, MetaUpgrades};
use crate::buildings::Town;
use crate::character::progression::Character;
use crate::items::Equipment;
use crate::stats::{EffectiveProfile, ProfileInputs};
use crate::zones::ZoneProgression;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub gold: u64,
    pub materials: u64,
    pub prestige_points: u64,
}

/// Everything a player owns. External persistence stores this opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub character: Character,
    pub equipment: Equipment,
    #[serde(default)]
    pub town: Town,
    #[serde(default)]
    pub meta: MetaUpgrades,
    #[serde(default)]
    pub compendium: Compendium,
    #[serde(default)]
    pub buffs: ActiveBuffs,
    #[serde(default)]
    pub wallet: Wallet,
    #[serde(default)]
    pub zones: ZoneProgression,
    #[serde(default)]
    pub prestige_count: u32,
}

impl PlayerState {
    pub fn new(character: Character) -> Self {
        Self {
            character,
            equipment: Equipment::new(),
            town: Town::new(),
            meta: MetaUpgrades::new(),
            compendium: Compendium::new(),
            buffs: ActiveBuffs::new(),
            wallet: Wallet::default(),
            zones: ZoneProgression::new(),
            prestige_count: 0,
        }
    }

    /// Snapshot every collaborator for the stat aggregator.
    pub fn profile_inputs<'a>(
        &'a self,
        content: &'a ContentCatalog,
        now: DateTime<Utc>,
    ) -> ProfileInputs<'a> {
        ProfileInputs::new(&self.character.abilities, now)
            .with_equipment(&self.equipment)
            .with_town(&self.town, &content.buildings)
            .with_meta(&self.meta)
            .with_compendium(&self.compendium, content.total_species())
            .with_buffs(&self.buffs)
    }

    pub fn effective_profile(
        &self,
        content: &ContentCatalog,
        now: DateTime<Utc>,
    ) -> EffectiveProfile {
        EffectiveProfile::compute(&self.profile_inputs(content, now))
    }
}
