//! Monster compendium: per-species counters and the mastery bonus they
//! unlock. Survives prestige.

use crate::core::constants::{
    COMPENDIUM_CRIT_PER_MILESTONE, COMPENDIUM_DAMAGE_PER_MILESTONE,
    COMPENDIUM_DISCOVERY_STEP_PERCENT, COMPENDIUM_GOLD_PER_STEP, COMPENDIUM_KILL_MILESTONES,
    COMPENDIUM_XP_PER_STEP,
};
use crate::effects::{Channel, ChannelMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompendiumEntry {
    pub encountered: u64,
    pub killed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compendium {
    entries: HashMap<String, CompendiumEntry>,
    lifetime_kills: u64,
}

impl Compendium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_encounter(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_default().encountered += 1;
    }

    pub fn record_kill(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_default().killed += 1;
        self.lifetime_kills += 1;
    }

    pub fn entry(&self, name: &str) -> Option<&CompendiumEntry> {
        self.entries.get(name)
    }

    pub fn lifetime_kills(&self) -> u64 {
        self.lifetime_kills
    }

    pub fn species_discovered(&self) -> usize {
        self.entries.values().filter(|e| e.encountered > 0).count()
    }

    /// Share of `total_species` ever encountered, 0..=100.
    pub fn discovery_percent(&self, total_species: usize) -> f64 {
        if total_species == 0 {
            return 0.0;
        }
        let pct = self.species_discovered() as f64 / total_species as f64 * 100.0;
        pct.min(100.0)
    }

    /// Full 10% discovery steps, computed in integers so 30% is exactly 3.
    pub fn discovery_steps(&self, total_species: usize) -> usize {
        if total_species == 0 {
            return 0;
        }
        let per_step = (100.0 / COMPENDIUM_DISCOVERY_STEP_PERCENT) as usize;
        self.species_discovered().min(total_species) * per_step / total_species
    }

    pub fn milestones_reached(&self) -> usize {
        COMPENDIUM_KILL_MILESTONES
            .iter()
            .filter(|m| self.lifetime_kills >= **m)
            .count()
    }

    /// Additive mastery bonus:
    /// every full 10% discovered -> +2% gold, +1% XP;
    /// every kill milestone -> +1 click, +1 auto, +0.5% crit.
    pub fn mastery_bonus(&self, total_species: usize) -> ChannelMap {
        let steps = self.discovery_steps(total_species) as f64;
        let milestones = self.milestones_reached() as f64;

        let mut map = ChannelMap::new();
        map.add_to(Channel::GoldBonus, steps * COMPENDIUM_GOLD_PER_STEP);
        map.add_to(Channel::XpBonus, steps * COMPENDIUM_XP_PER_STEP);
        map.add_to(Channel::ClickDamage, milestones * COMPENDIUM_DAMAGE_PER_MILESTONE);
        map.add_to(Channel::AutoDamage, milestones * COMPENDIUM_DAMAGE_PER_MILESTONE);
        map.add_to(Channel::CritChance, milestones * COMPENDIUM_CRIT_PER_MILESTONE);
        map
    }
}
