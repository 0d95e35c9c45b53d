//! Equipment drops from monster kills.

use super::types::{EquipmentSlot, Item, ItemStats, Rarity, WeaponType};
use crate::character::attributes::Ability;
use crate::core::config::BalanceConfig;
use crate::core::constants::{RARITY_BONUS_CAP, RARITY_BONUS_PER_CLEAR, ZONE_ILVL_MULTIPLIER};
use crate::core::dice::Dice;
use crate::effects::Channel;

/// Item level for drops in a zone.
pub fn zone_item_level(zone_id: u32) -> u32 {
    zone_id.max(1) * ZONE_ILVL_MULTIPLIER
}

/// Roll for an equipment drop after a kill.
pub fn roll_drop(
    zone_id: u32,
    is_boss: bool,
    clear_count: u32,
    config: &BalanceConfig,
    dice: &mut impl Dice,
) -> Option<Item> {
    let base = if is_boss {
        config.boss_drop_chance
    } else {
        config.normal_drop_chance
    };
    if !dice.succeeds(config.clamp_chance(base)) {
        return None;
    }
    let rarity = roll_rarity(clear_count, dice);
    let slot = roll_random_slot(dice);
    Some(generate_item(slot, rarity, zone_item_level(zone_id), dice))
}

/// Base distribution: 55% Common, 30% Magic, 12% Rare, 2.5% Epic,
/// 0.5% Legendary. Each clear past the first shifts 2% out of Common,
/// capped at 20%.
pub fn roll_rarity(clear_count: u32, dice: &mut impl Dice) -> Rarity {
    let roll = dice.chance();
    let bonus =
        (clear_count.saturating_sub(1) as f64 * RARITY_BONUS_PER_CLEAR).min(RARITY_BONUS_CAP);

    let common_threshold = (0.55 - bonus).max(0.10);
    let magic_threshold = common_threshold + 0.30;
    let rare_threshold = magic_threshold + 0.12 + bonus * 0.4;
    let epic_threshold = rare_threshold + 0.025 + bonus * 0.4;

    if roll < common_threshold {
        Rarity::Common
    } else if roll < magic_threshold {
        Rarity::Magic
    } else if roll < rare_threshold {
        Rarity::Rare
    } else if roll < epic_threshold {
        Rarity::Epic
    } else {
        Rarity::Legendary
    }
}

pub fn roll_random_slot(dice: &mut impl Dice) -> EquipmentSlot {
    EquipmentSlot::ALL[dice.pick_index(EquipmentSlot::ALL.len())]
}

fn base_name(slot: EquipmentSlot, weapon_type: Option<WeaponType>) -> &'static str {
    match (slot, weapon_type) {
        (EquipmentSlot::Weapon, Some(WeaponType::Slash)) => "Sword",
        (EquipmentSlot::Weapon, Some(WeaponType::Pierce)) => "Spear",
        (EquipmentSlot::Weapon, Some(WeaponType::Blunt)) => "Mace",
        (EquipmentSlot::Weapon, Some(WeaponType::Fire)) => "Ember Staff",
        (EquipmentSlot::Weapon, Some(WeaponType::Ice)) => "Frost Wand",
        (EquipmentSlot::Weapon, Some(WeaponType::Lightning)) => "Storm Rod",
        (EquipmentSlot::Weapon, Some(WeaponType::Arcane)) => "Grimoire",
        (EquipmentSlot::Weapon, None) => "Club",
        (EquipmentSlot::Offhand, _) => "Buckler",
        (EquipmentSlot::Helmet, _) => "Helm",
        (EquipmentSlot::Armor, _) => "Hauberk",
        (EquipmentSlot::Gloves, _) => "Gauntlets",
        (EquipmentSlot::Boots, _) => "Greaves",
        (EquipmentSlot::Amulet, _) => "Amulet",
        (EquipmentSlot::Ring, _) => "Ring",
    }
}

/// Channel each slot rolls its bonus on.
fn slot_channel(slot: EquipmentSlot) -> Channel {
    match slot {
        EquipmentSlot::Weapon | EquipmentSlot::Ring => Channel::ClickDamage,
        EquipmentSlot::Offhand => Channel::AutoDamage,
        EquipmentSlot::Helmet => Channel::XpBonus,
        EquipmentSlot::Armor => Channel::MaterialBonus,
        EquipmentSlot::Gloves => Channel::CritChance,
        EquipmentSlot::Boots => Channel::AutoSpeed,
        EquipmentSlot::Amulet => Channel::GoldBonus,
    }
}

/// ilvl 10: 1.0x, ilvl 40: 2.0x, ilvl 100: 4.0x
fn ilvl_multiplier(ilvl: u32) -> f64 {
    1.0 + (ilvl.max(10) as f64 - 10.0) / 30.0
}

/// Generate an item with the given slot, rarity, and item level.
pub fn generate_item(slot: EquipmentSlot, rarity: Rarity, ilvl: u32, dice: &mut impl Dice) -> Item {
    let (base_min, base_max) = match rarity {
        Rarity::Common => (1, 1),
        Rarity::Magic => (1, 2),
        Rarity::Rare => (2, 3),
        Rarity::Epic => (3, 4),
        Rarity::Legendary => (4, 6),
    };
    let multiplier = ilvl_multiplier(ilvl);
    let mut stats = ItemStats::new();

    let num_abilities = dice.range_inclusive(1, 3);
    for _ in 0..num_abilities {
        let ability = Ability::all()[dice.pick_index(Ability::all().len())];
        let value = ((dice.range_inclusive(base_min, base_max) as f64) * multiplier).round() as i32;
        let current = stats.abilities.get(ability);
        stats.abilities.set(ability, current + value.max(1));
    }

    let channel = slot_channel(slot);
    let channel_value = (rarity as i32 + 1) as f64 * multiplier;
    let channel_value = if channel.is_percent() {
        channel_value * 2.0
    } else {
        channel_value
    };
    stats.channels.add_to(channel, channel_value.round());

    let weapon_type = match slot {
        EquipmentSlot::Weapon => Some(WeaponType::ALL[dice.pick_index(WeaponType::ALL.len())]),
        _ => None,
    };

    let name = format!("{} {}", rarity.name(), base_name(slot, weapon_type));
    Item {
        slot,
        rarity,
        level: ilvl,
        name,
        stats,
        weapon_type,
    }
}
