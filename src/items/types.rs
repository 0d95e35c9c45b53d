use crate::character::attributes::{Ability, AbilityScores};
use crate::effects::ChannelMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Offhand,
    Helmet,
    Armor,
    Gloves,
    Boots,
    Amulet,
    Ring,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 8] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Offhand,
        EquipmentSlot::Helmet,
        EquipmentSlot::Armor,
        EquipmentSlot::Gloves,
        EquipmentSlot::Boots,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Offhand => "Offhand",
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Amulet => "Amulet",
            EquipmentSlot::Ring => "Ring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Magic = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Damage type of a weapon; also what boss traits key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Slash,
    Pierce,
    Blunt,
    Fire,
    Ice,
    Lightning,
    Arcane,
}

impl WeaponType {
    pub const ALL: [WeaponType; 7] = [
        WeaponType::Slash,
        WeaponType::Pierce,
        WeaponType::Blunt,
        WeaponType::Fire,
        WeaponType::Ice,
        WeaponType::Lightning,
        WeaponType::Arcane,
    ];

    pub fn is_magic(&self) -> bool {
        matches!(
            self,
            WeaponType::Fire | WeaponType::Ice | WeaponType::Lightning | WeaponType::Arcane
        )
    }
}

/// Ability that drives attack and damage for a weapon type.
/// Unarmed attacks use strength.
pub fn relevant_ability(weapon_type: Option<WeaponType>) -> Ability {
    match weapon_type {
        Some(WeaponType::Pierce) => Ability::Dexterity,
        Some(w) if w.is_magic() => Ability::Intelligence,
        _ => Ability::Strength,
    }
}

/// Bonuses an item grants while equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Signed deltas added to the wearer's ability scores.
    pub abilities: AbilityScores,
    pub channels: ChannelMap,
}

impl Default for ItemStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStats {
    pub fn new() -> Self {
        Self {
            abilities: AbilityScores::zero(),
            channels: ChannelMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub level: u32,
    pub name: String,
    pub stats: ItemStats,
    #[serde(default)]
    pub weapon_type: Option<WeaponType>,
}

impl Item {
    pub fn new(slot: EquipmentSlot, rarity: Rarity, level: u32, name: impl Into<String>) -> Self {
        Self {
            slot,
            rarity,
            level,
            name: name.into(),
            stats: ItemStats::new(),
            weapon_type: None,
        }
    }

    pub fn with_weapon_type(mut self, weapon_type: WeaponType) -> Self {
        self.weapon_type = Some(weapon_type);
        self
    }

    pub fn with_stats(mut self, stats: ItemStats) -> Self {
        self.stats = stats;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Magic);
        assert!(Rarity::Magic < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_relevant_ability() {
        assert_eq!(relevant_ability(None), Ability::Strength);
        assert_eq!(relevant_ability(Some(WeaponType::Slash)), Ability::Strength);
        assert_eq!(relevant_ability(Some(WeaponType::Blunt)), Ability::Strength);
        assert_eq!(relevant_ability(Some(WeaponType::Pierce)), Ability::Dexterity);
        for magic in [
            WeaponType::Fire,
            WeaponType::Ice,
            WeaponType::Lightning,
            WeaponType::Arcane,
        ] {
            assert_eq!(relevant_ability(Some(magic)), Ability::Intelligence);
        }
    }

    #[test]
    fn test_item_stats_default_is_neutral() {
        let stats = ItemStats::default();
        assert_eq!(stats.abilities, AbilityScores::zero());
        assert!(stats.channels.is_zero());
    }

    #[test]
    fn test_eight_slots() {
        assert_eq!(EquipmentSlot::ALL.len(), 8);
        assert_eq!(EquipmentSlot::Offhand.name(), "Offhand");
    }
}
