use crate::core::constants::{IMMUNE_MULTIPLIER, RESISTANT_MULTIPLIER, VULNERABLE_MULTIPLIER};
use crate::items::WeaponType;
use serde::{Deserialize, Serialize};

/// How a boss reacts to weapon damage types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BossTraits {
    #[serde(default)]
    pub vulnerabilities: Vec<WeaponType>,
    #[serde(default)]
    pub resistances: Vec<WeaponType>,
    #[serde(default)]
    pub immunities: Vec<WeaponType>,
}

impl BossTraits {
    /// Damage multiplier for an attack of `weapon_type`.
    ///
    /// Immune beats resistant, resistant beats vulnerable. Unarmed attacks
    /// are never affected.
    pub fn effectiveness(&self, weapon_type: Option<WeaponType>) -> f64 {
        let Some(weapon_type) = weapon_type else {
            return 1.0;
        };
        if self.immunities.contains(&weapon_type) {
            IMMUNE_MULTIPLIER
        } else if self.resistances.contains(&weapon_type) {
            RESISTANT_MULTIPLIER
        } else if self.vulnerabilities.contains(&weapon_type) {
            VULNERABLE_MULTIPLIER
        } else {
            1.0
        }
    }
}

/// Modifier rolled onto a regular monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterAffix {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hp_multiplier: Option<f64>,
    #[serde(default)]
    pub gold_multiplier: Option<f64>,
    #[serde(default)]
    pub material_bonus: Option<u64>,
    #[serde(default)]
    pub miss_chance: Option<f64>,
}

impl MonsterAffix {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hp_multiplier: None,
            gold_multiplier: None,
            material_bonus: None,
            miss_chance: None,
        }
    }
}

/// The global affix table.
pub fn standard_affixes() -> Vec<MonsterAffix> {
    vec![
        MonsterAffix {
            hp_multiplier: Some(1.5),
            ..MonsterAffix::new("armored", "Armored")
        },
        MonsterAffix {
            gold_multiplier: Some(2.0),
            ..MonsterAffix::new("gilded", "Gilded")
        },
        MonsterAffix {
            material_bonus: Some(3),
            ..MonsterAffix::new("hoarding", "Hoarding")
        },
        MonsterAffix {
            miss_chance: Some(0.25),
            ..MonsterAffix::new("elusive", "Elusive")
        },
        MonsterAffix {
            hp_multiplier: Some(2.0),
            gold_multiplier: Some(1.5),
            ..MonsterAffix::new("colossal", "Colossal")
        },
    ]
}

/// A live monster or boss. Fresh for every encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterInstance {
    pub instance_id: u64,
    pub zone_id: u32,
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub armor_class: u32,
    pub affix: Option<MonsterAffix>,
    /// Present only on bosses.
    pub boss: Option<BossTraits>,
    /// Set once the kill reward has been granted.
    pub rewarded: bool,
}

impl MonsterInstance {
    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Name including the affix prefix, e.g. "Armored Slime".
    pub fn display_name(&self) -> String {
        match &self.affix {
            Some(affix) => format!("{} {}", affix.name, self.name),
            None => self.name.clone(),
        }
    }

    pub fn miss_chance(&self) -> f64 {
        self.affix
            .as_ref()
            .and_then(|a| a.miss_chance)
            .unwrap_or(0.0)
    }

    pub fn gold_multiplier(&self) -> f64 {
        self.affix
            .as_ref()
            .and_then(|a| a.gold_multiplier)
            .unwrap_or(1.0)
    }

    pub fn material_bonus(&self) -> u64 {
        self.affix
            .as_ref()
            .and_then(|a| a.material_bonus)
            .unwrap_or(0)
    }

    /// Damage multiplier against this monster for a weapon type.
    pub fn effectiveness(&self, weapon_type: Option<WeaponType>) -> f64 {
        self.boss
            .as_ref()
            .map(|traits| traits.effectiveness(weapon_type))
            .unwrap_or(1.0)
    }
}
