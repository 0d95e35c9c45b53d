//! Effective combat profile: every bonus source folded into one view.
//!
//! The stored profile is the "base" view (equipment and buildings only) used
//! for display. Meta-upgrades, compendium mastery and buffs are applied at
//! the point of use through [`EffectiveProfile::boosted`].

use crate::bonuses::{ActiveBuffs, Compendium, MetaUpgradeId, MetaUpgrades};
use crate::buildings::{compute_building_effects, BuildingCatalog, Town};
use crate::character::attributes::{Ability, AbilityScores};
use crate::effects::{Channel, ChannelAccumulator, ChannelMap};
use crate::items::{relevant_ability, Equipment, WeaponType};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Borrowed snapshots of every bonus source. `None` means the collaborator
/// is unavailable and contributes neutral values.
#[derive(Debug, Clone, Copy)]
pub struct ProfileInputs<'a> {
    pub base_abilities: &'a AbilityScores,
    pub equipment: Option<&'a Equipment>,
    pub town: Option<(&'a Town, &'a BuildingCatalog)>,
    pub meta: Option<&'a MetaUpgrades>,
    /// Compendium plus the number of species in the zone catalog.
    pub compendium: Option<(&'a Compendium, usize)>,
    pub buffs: Option<&'a ActiveBuffs>,
    pub now: DateTime<Utc>,
}

impl<'a> ProfileInputs<'a> {
    pub fn new(base_abilities: &'a AbilityScores, now: DateTime<Utc>) -> Self {
        Self {
            base_abilities,
            equipment: None,
            town: None,
            meta: None,
            compendium: None,
            buffs: None,
            now,
        }
    }

    pub fn with_equipment(mut self, equipment: &'a Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_town(mut self, town: &'a Town, catalog: &'a BuildingCatalog) -> Self {
        self.town = Some((town, catalog));
        self
    }

    pub fn with_meta(mut self, meta: &'a MetaUpgrades) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_compendium(mut self, compendium: &'a Compendium, total_species: usize) -> Self {
        self.compendium = Some((compendium, total_species));
        self
    }

    pub fn with_buffs(mut self, buffs: &'a ActiveBuffs) -> Self {
        self.buffs = Some(buffs);
        self
    }
}

/// Bonuses applied after the base profile, in this order:
/// `((raw * meta) + compendium + buff_add) * buff_mult`.
#[derive(Debug, Clone, PartialEq)]
pub struct LastMileBonuses {
    meta_factors: ChannelMap,
    pub offline_rate: f64,
    pub compendium: ChannelMap,
    buffs: ChannelAccumulator,
}

impl Default for LastMileBonuses {
    fn default() -> Self {
        Self::neutral()
    }
}

impl LastMileBonuses {
    pub fn neutral() -> Self {
        let mut meta_factors = ChannelMap::new();
        for channel in Channel::ALL {
            meta_factors.set(channel, 1.0);
        }
        Self {
            meta_factors,
            offline_rate: 1.0,
            compendium: ChannelMap::new(),
            buffs: ChannelAccumulator::new(),
        }
    }

    pub fn meta_factor(&self, channel: Channel) -> f64 {
        self.meta_factors.get(channel)
    }

    pub fn buff_add(&self, channel: Channel) -> f64 {
        self.buffs.additive(channel)
    }

    pub fn buff_mult(&self, channel: Channel) -> f64 {
        self.buffs.multiplier(channel)
    }

    pub fn apply(&self, channel: Channel, raw: f64) -> f64 {
        ((raw * self.meta_factor(channel)) + self.compendium.get(channel) + self.buff_add(channel))
            * self.buff_mult(channel)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveProfile {
    pub abilities: AbilityScores,
    pub channels: ChannelMap,
    pub weapon_type: Option<WeaponType>,
    pub last_mile: LastMileBonuses,
}

impl EffectiveProfile {
    pub fn compute(inputs: &ProfileInputs<'_>) -> Self {
        let mut abilities = *inputs.base_abilities;
        let mut channels = ChannelMap::new();
        let mut weapon_type = None;

        match inputs.equipment {
            Some(equipment) => {
                let bonuses = equipment.bonuses();
                abilities.add(&bonuses.abilities);
                channels.add(&bonuses.channels);
                weapon_type = equipment.weapon_type();
            }
            None => debug!("equipment unavailable, using neutral values"),
        }

        match inputs.town {
            Some((town, catalog)) => {
                channels.add(&compute_building_effects(town.owned(), catalog));
            }
            None => debug!("town unavailable, using neutral values"),
        }

        let mut last_mile = LastMileBonuses::neutral();

        match inputs.meta {
            Some(meta) => {
                for channel in Channel::ALL {
                    last_mile.meta_factors.set(channel, meta.channel_factor(channel));
                }
                last_mile.offline_rate = meta.factor(MetaUpgradeId::OfflineRate);
            }
            None => debug!("meta upgrades unavailable, using neutral values"),
        }

        match inputs.compendium {
            Some((compendium, total_species)) => {
                last_mile.compendium = compendium.mastery_bonus(total_species);
            }
            None => debug!("compendium unavailable, using neutral values"),
        }

        match inputs.buffs {
            Some(buffs) => last_mile.buffs = buffs.modifiers(inputs.now),
            None => debug!("buffs unavailable, using neutral values"),
        }

        Self {
            abilities,
            channels,
            weapon_type,
            last_mile,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    /// Ability the current weapon attacks with.
    pub fn attack_ability(&self) -> Ability {
        relevant_ability(self.weapon_type)
    }

    pub fn attack_modifier(&self) -> i32 {
        self.modifier(self.attack_ability())
    }

    /// Base (display) value of a channel.
    pub fn raw(&self, channel: Channel) -> f64 {
        self.channels.get(channel)
    }

    /// Channel value with every last-mile bonus applied.
    pub fn boosted(&self, channel: Channel) -> f64 {
        self.last_mile.apply(channel, self.raw(channel))
    }

    pub fn boosted_channels(&self) -> ChannelMap {
        let mut map = ChannelMap::new();
        for channel in Channel::ALL {
            map.set(channel, self.boosted(channel));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonuses::Buff;
    use crate::buildings::BuildingId;
    use crate::effects::Effect;
    use crate::items::{EquipmentSlot, Item, ItemStats, Rarity};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_bare_profile_is_base_scores() {
        let base = AbilityScores::from_values(14, 10, 10, 10, 10, 10);
        let profile = EffectiveProfile::compute(&ProfileInputs::new(&base, now()));
        assert_eq!(profile.abilities, base);
        assert!(profile.channels.is_zero());
        assert!(profile.boosted_channels().is_zero());
        assert_eq!(profile.attack_modifier(), 2);
    }

    #[test]
    fn test_equipment_deltas_feed_modifiers() {
        let base = AbilityScores::new();
        let mut equipment = Equipment::new();
        let mut stats = ItemStats::new();
        stats.abilities.set(Ability::Dexterity, 4);
        stats.channels.add_to(Channel::ClickDamage, 3.0);
        equipment.equip(
            Item::new(EquipmentSlot::Weapon, Rarity::Magic, 10, "Spear")
                .with_weapon_type(WeaponType::Pierce)
                .with_stats(stats),
        );

        let profile =
            EffectiveProfile::compute(&ProfileInputs::new(&base, now()).with_equipment(&equipment));
        assert_eq!(profile.attack_ability(), Ability::Dexterity);
        assert_eq!(profile.attack_modifier(), 2);
        assert_eq!(profile.raw(Channel::ClickDamage), 3.0);
    }

    #[test]
    fn test_town_effects_added() {
        let base = AbilityScores::new();
        let catalog = BuildingCatalog::standard();
        let town = Town::with_levels(&[(BuildingId::Market, 2)]);
        let profile =
            EffectiveProfile::compute(&ProfileInputs::new(&base, now()).with_town(&town, &catalog));
        assert_eq!(profile.raw(Channel::GoldBonus), 10.0);
    }

    #[test]
    fn test_last_mile_order() {
        let base = AbilityScores::new();
        let catalog = BuildingCatalog::standard();
        // Blacksmith 5 -> 5 click damage
        let town = Town::with_levels(&[(BuildingId::Blacksmith, 5)]);
        let mut meta = MetaUpgrades::new();
        let mut points = 100;
        meta.try_purchase(MetaUpgradeId::GlobalDamage, &mut points)
            .unwrap();
        meta.try_purchase(MetaUpgradeId::GlobalDamage, &mut points)
            .unwrap();
        let mut compendium = Compendium::new();
        for _ in 0..100 {
            compendium.record_kill("Slime");
        }
        let mut buffs = ActiveBuffs::new();
        buffs.add(Buff::lasting(
            "rage",
            vec![
                Effect::add(Channel::ClickDamage, 2.0),
                Effect::multiply(Channel::ClickDamage, 2.0),
            ],
            now(),
            60,
        ));

        let inputs = ProfileInputs::new(&base, now())
            .with_town(&town, &catalog)
            .with_meta(&meta)
            .with_compendium(&compendium, 10)
            .with_buffs(&buffs);
        let profile = EffectiveProfile::compute(&inputs);

        // ((5 * 1.2) + 1 + 2) * 2 = 18
        assert_eq!(profile.raw(Channel::ClickDamage), 5.0);
        assert!((profile.boosted(Channel::ClickDamage) - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_expired_buff_ignored() {
        let base = AbilityScores::new();
        let mut buffs = ActiveBuffs::new();
        buffs.add(Buff::lasting(
            "old",
            vec![Effect::add(Channel::XpBonus, 50.0)],
            now(),
            -1,
        ));
        let profile =
            EffectiveProfile::compute(&ProfileInputs::new(&base, now()).with_buffs(&buffs));
        assert_eq!(profile.boosted(Channel::XpBonus), 0.0);
    }

    #[test]
    fn test_offline_rate_exposed() {
        let base = AbilityScores::new();
        let mut meta = MetaUpgrades::new();
        let mut points = 100;
        meta.try_purchase(MetaUpgradeId::OfflineRate, &mut points)
            .unwrap();
        let profile = EffectiveProfile::compute(&ProfileInputs::new(&base, now()).with_meta(&meta));
        assert!((profile.last_mile.offline_rate - 1.1).abs() < 1e-9);
        assert!(profile.boosted_channels().is_zero());
    }
}
