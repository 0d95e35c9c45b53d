use super::types::{EquipmentSlot, Item, WeaponType};
use crate::character::attributes::AbilityScores;
use crate::effects::ChannelMap;
use serde::{Deserialize, Serialize};

/// Player equipment: one item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub offhand: Option<Item>,
    #[serde(default)]
    pub helmet: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
    #[serde(default)]
    pub gloves: Option<Item>,
    #[serde(default)]
    pub boots: Option<Item>,
    #[serde(default)]
    pub amulet: Option<Item>,
    #[serde(default)]
    pub ring: Option<Item>,
}

/// Summed bonuses of everything equipped.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentBonuses {
    pub abilities: AbilityScores,
    pub channels: ChannelMap,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Offhand => &self.offhand,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Offhand => &mut self.offhand,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }

    /// Put an item in its slot, returning whatever was there.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.offhand,
            &self.helmet,
            &self.armor,
            &self.gloves,
            &self.boots,
            &self.amulet,
            &self.ring,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    /// Damage type of the equipped weapon; None when unarmed.
    pub fn weapon_type(&self) -> Option<WeaponType> {
        self.weapon.as_ref().and_then(|w| w.weapon_type)
    }

    /// Sum of ability and channel bonuses across every equipped item.
    pub fn bonuses(&self) -> EquipmentBonuses {
        let mut abilities = AbilityScores::zero();
        let mut channels = ChannelMap::new();
        for item in self.iter_equipped() {
            abilities.add(&item.stats.abilities);
            channels.add(&item.stats.channels);
        }
        EquipmentBonuses {
            abilities,
            channels,
        }
    }
}
