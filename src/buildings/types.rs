//! Town building definitions and per-player town state.

use crate::effects::{Channel, Effect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingId {
    Blacksmith,
    TrainingHall,
    Workshop,
    ClockTower,
    Watchtower,
    Market,
    Library,
    Mine,
    CraftersGuild,
    QuestBoard,
}

impl BuildingId {
    pub const ALL: [BuildingId; 10] = [
        BuildingId::Blacksmith,
        BuildingId::TrainingHall,
        BuildingId::Workshop,
        BuildingId::ClockTower,
        BuildingId::Watchtower,
        BuildingId::Market,
        BuildingId::Library,
        BuildingId::Mine,
        BuildingId::CraftersGuild,
        BuildingId::QuestBoard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuildingId::Blacksmith => "Blacksmith",
            BuildingId::TrainingHall => "Training Hall",
            BuildingId::Workshop => "Workshop",
            BuildingId::ClockTower => "Clock Tower",
            BuildingId::Watchtower => "Watchtower",
            BuildingId::Market => "Market",
            BuildingId::Library => "Library",
            BuildingId::Mine => "Mine",
            BuildingId::CraftersGuild => "Crafters' Guild",
            BuildingId::QuestBoard => "Quest Board",
        }
    }
}

fn default_min_level() -> u32 {
    1
}

/// Bonus a building grants while another building is owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub requires: BuildingId,
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    pub effect: Effect,
}

impl Synergy {
    pub fn new(requires: BuildingId, effect: Effect) -> Self {
        Self {
            requires,
            min_level: default_min_level(),
            effect,
        }
    }

    pub fn at_level(mut self, min_level: u32) -> Self {
        self.min_level = min_level;
        self
    }
}

/// Static definition of a building. `effects` are per-level values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDef {
    pub id: BuildingId,
    pub max_level: u32,
    pub base_cost: f64,
    pub cost_growth: f64,
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub synergies: Vec<Synergy>,
}

impl BuildingDef {
    /// Gold cost to go from `level` to `level + 1`, or None when maxed.
    pub fn upgrade_cost(&self, level: u32) -> Option<u64> {
        if level >= self.max_level {
            return None;
        }
        Some((self.base_cost * self.cost_growth.powi(level as i32)).ceil() as u64)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildingCatalog {
    defs: HashMap<BuildingId, BuildingDef>,
}

impl BuildingCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: BuildingId) -> Option<&BuildingDef> {
        self.defs.get(&id)
    }

    pub fn insert(&mut self, def: BuildingDef) {
        self.defs.insert(def.id, def);
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// The shipped town: one definition per `BuildingId`.
    pub fn standard() -> Self {
        use crate::effects::Channel::*;

        let defs = [
            BuildingDef {
                id: BuildingId::Blacksmith,
                max_level: 25,
                base_cost: 25.0,
                cost_growth: 1.15,
                effects: vec![Effect::add(ClickDamage, 1.0)],
                synergies: vec![Synergy::new(
                    BuildingId::Mine,
                    Effect::multiply(ClickDamage, 1.10),
                )],
            },
            BuildingDef {
                id: BuildingId::TrainingHall,
                max_level: 25,
                base_cost: 40.0,
                cost_growth: 1.15,
                effects: vec![Effect::add(AutoDamage, 1.0)],
                synergies: vec![Synergy::new(
                    BuildingId::Blacksmith,
                    Effect::add(ClickDamage, 0.5),
                )
                .at_level(5)],
            },
            BuildingDef {
                id: BuildingId::Workshop,
                max_level: 10,
                base_cost: 100.0,
                cost_growth: 1.6,
                effects: vec![Effect::add(AutoClickerCount, 1.0)],
                synergies: vec![Synergy::new(
                    BuildingId::ClockTower,
                    Effect::multiply(AutoSpeed, 1.25),
                )
                .at_level(3)],
            },
            BuildingDef {
                id: BuildingId::ClockTower,
                max_level: 10,
                base_cost: 150.0,
                cost_growth: 1.4,
                effects: vec![Effect::add(AutoSpeed, 5.0)],
                synergies: Vec::new(),
            },
            BuildingDef {
                id: BuildingId::Watchtower,
                max_level: 10,
                base_cost: 120.0,
                cost_growth: 1.35,
                effects: vec![Effect::add(CritChance, 1.0)],
                synergies: Vec::new(),
            },
            BuildingDef {
                id: BuildingId::Market,
                max_level: 20,
                base_cost: 60.0,
                cost_growth: 1.25,
                effects: vec![Effect::add(GoldBonus, 5.0)],
                synergies: vec![Synergy::new(BuildingId::Mine, Effect::add(GoldBonus, 2.0))],
            },
            BuildingDef {
                id: BuildingId::Library,
                max_level: 20,
                base_cost: 60.0,
                cost_growth: 1.25,
                effects: vec![Effect::add(XpBonus, 5.0)],
                synergies: vec![Synergy::new(
                    BuildingId::QuestBoard,
                    Effect::add(XpBonus, 1.0),
                )],
            },
            BuildingDef {
                id: BuildingId::Mine,
                max_level: 20,
                base_cost: 50.0,
                cost_growth: 1.2,
                effects: vec![Effect::add(MaterialBonus, 5.0)],
                synergies: Vec::new(),
            },
            BuildingDef {
                id: BuildingId::CraftersGuild,
                max_level: 10,
                base_cost: 80.0,
                cost_growth: 1.3,
                effects: vec![
                    Effect::add(CraftingSpeed, 5.0),
                    Effect::add(MaterialBonus, 2.0),
                ],
                synergies: Vec::new(),
            },
            BuildingDef {
                id: BuildingId::QuestBoard,
                max_level: 10,
                base_cost: 75.0,
                cost_growth: 1.3,
                effects: vec![Effect::add(QuestEfficiency, 5.0)],
                synergies: Vec::new(),
            },
        ];

        let mut catalog = Self::empty();
        for def in defs {
            catalog.insert(def);
        }
        catalog
    }

    /// Channels any building in the catalog can touch.
    pub fn channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| {
                self.defs.values().any(|d| {
                    d.effects.iter().any(|e| e.channel == *c)
                        || d.synergies.iter().any(|s| s.effect.channel == *c)
                })
            })
            .collect()
    }
}

/// Owned building levels. Levels only rise, except on prestige reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Town {
    levels: HashMap<BuildingId, u32>,
}

impl Town {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: BuildingId) -> u32 {
        self.levels.get(&id).copied().unwrap_or(0)
    }

    /// Owned `(id, level)` pairs with level > 0.
    pub fn owned(&self) -> impl Iterator<Item = (BuildingId, u32)> + '_ {
        self.levels
            .iter()
            .filter(|(_, level)| **level > 0)
            .map(|(id, level)| (*id, *level))
    }

    pub fn buildings_owned(&self) -> usize {
        self.owned().count()
    }

    pub(crate) fn set_level(&mut self, id: BuildingId, level: u32) {
        self.levels.insert(id, level);
    }

    /// Build a town directly from levels; for tests and tooling.
    pub fn with_levels(levels: &[(BuildingId, u32)]) -> Self {
        let mut town = Self::new();
        for (id, level) in levels {
            town.set_level(*id, *level);
        }
        town
    }
}
