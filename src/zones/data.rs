//! Zone content: monster pools, bosses and base rewards.

use crate::combat::monster::BossTraits;
use crate::core::error::ContentError;
use crate::items::WeaponType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub hp: u32,
    pub armor_class: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDef {
    pub name: String,
    pub hp: u32,
    pub armor_class: u32,
    #[serde(default)]
    pub traits: BossTraits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub id: u32,
    pub name: String,
    pub base_difficulty: f64,
    pub monsters_to_defeat: u32,
    pub pool: Vec<MonsterTemplate>,
    pub boss: Option<BossDef>,
    pub base_xp: u64,
    pub base_gold: u64,
    pub base_materials: u64,
}

impl ZoneDef {
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.base_difficulty <= 0.0 {
            return Err(ContentError::InvalidDifficulty(self.id));
        }
        if self.pool.is_empty() {
            return Err(ContentError::EmptyMonsterPool(self.id));
        }
        if let Some(bad) = self.pool.iter().find(|m| m.hp == 0) {
            return Err(ContentError::InvalidMonster {
                zone_id: self.id,
                name: bad.name.clone(),
            });
        }
        let boss = self.boss.as_ref().ok_or(ContentError::MissingBoss(self.id))?;
        if boss.hp == 0 {
            return Err(ContentError::InvalidBoss {
                zone_id: self.id,
                name: boss.name.clone(),
            });
        }
        Ok(())
    }
}

fn mob(name: &str, hp: u32, armor_class: u32) -> MonsterTemplate {
    MonsterTemplate {
        name: name.to_string(),
        hp,
        armor_class,
    }
}

fn boss(name: &str, hp: u32, armor_class: u32, traits: BossTraits) -> Option<BossDef> {
    Some(BossDef {
        name: name.to_string(),
        hp,
        armor_class,
        traits,
    })
}

fn traits(
    vulnerable: &[WeaponType],
    resistant: &[WeaponType],
    immune: &[WeaponType],
) -> BossTraits {
    BossTraits {
        vulnerabilities: vulnerable.to_vec(),
        resistances: resistant.to_vec(),
        immunities: immune.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCatalog {
    zones: Vec<ZoneDef>,
}

impl ZoneCatalog {
    /// Build and validate a catalog. Zones are kept sorted by id.
    pub fn new(mut zones: Vec<ZoneDef>) -> Result<Self, ContentError> {
        if zones.is_empty() {
            return Err(ContentError::NoZones);
        }
        for zone in &zones {
            zone.validate()?;
        }
        zones.sort_by_key(|z| z.id);
        Ok(Self { zones })
    }

    /// Re-check every zone; catalogs built with `standard()` skip `new()`.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.zones.is_empty() {
            return Err(ContentError::NoZones);
        }
        self.zones.iter().try_for_each(ZoneDef::validate)
    }

    pub fn get(&self, zone_id: u32) -> Option<&ZoneDef> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    pub fn require(&self, zone_id: u32) -> Result<&ZoneDef, ContentError> {
        self.get(zone_id).ok_or(ContentError::UnknownZone(zone_id))
    }

    pub fn zones(&self) -> &[ZoneDef] {
        &self.zones
    }

    /// Zone after `zone_id`, if any.
    pub fn next_zone_id(&self, zone_id: u32) -> Option<u32> {
        self.zones.iter().map(|z| z.id).find(|id| *id > zone_id)
    }

    pub fn first_zone_id(&self) -> u32 {
        self.zones.first().map(|z| z.id).unwrap_or(1)
    }

    /// Number of distinct species across every pool and boss.
    pub fn total_species(&self) -> usize {
        let mut names: Vec<&str> = self
            .zones
            .iter()
            .flat_map(|z| {
                z.pool
                    .iter()
                    .map(|m| m.name.as_str())
                    .chain(z.boss.iter().map(|b| b.name.as_str()))
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// The shipped zones.
    pub fn standard() -> Self {
        use WeaponType::*;

        let zones = vec![
            ZoneDef {
                id: 1,
                name: "Meadow".to_string(),
                base_difficulty: 1.0,
                monsters_to_defeat: 10,
                pool: vec![
                    mob("Slime", 20, 8),
                    mob("Giant Rat", 15, 8),
                    mob("Wild Boar", 30, 8),
                ],
                boss: boss("Field Guardian", 30, 9, traits(&[Fire], &[], &[])),
                base_xp: 10,
                base_gold: 5,
                base_materials: 1,
            },
            ZoneDef {
                id: 2,
                name: "Dark Forest".to_string(),
                base_difficulty: 2.0,
                monsters_to_defeat: 12,
                pool: vec![
                    mob("Dire Wolf", 30, 10),
                    mob("Forest Spider", 25, 11),
                    mob("Treant Sapling", 45, 9),
                ],
                boss: boss("Thicket Horror", 40, 11, traits(&[Fire], &[Pierce], &[])),
                base_xp: 25,
                base_gold: 12,
                base_materials: 2,
            },
            ZoneDef {
                id: 3,
                name: "Mountain Pass".to_string(),
                base_difficulty: 3.5,
                monsters_to_defeat: 15,
                pool: vec![
                    mob("Rock Troll", 50, 12),
                    mob("Harpy", 35, 13),
                    mob("Mountain Goat", 40, 11),
                ],
                boss: boss("Stone Golem", 60, 14, traits(&[Blunt], &[Slash], &[Pierce])),
                base_xp: 60,
                base_gold: 30,
                base_materials: 4,
            },
            ZoneDef {
                id: 4,
                name: "Ancient Ruins".to_string(),
                base_difficulty: 5.0,
                monsters_to_defeat: 18,
                pool: vec![
                    mob("Skeleton", 60, 14),
                    mob("Wraith", 50, 15),
                    mob("Cursed Knight", 80, 16),
                ],
                boss: boss("Lich King", 90, 16, traits(&[Fire, Lightning], &[Arcane], &[Ice])),
                base_xp: 140,
                base_gold: 70,
                base_materials: 8,
            },
            ZoneDef {
                id: 5,
                name: "Volcanic Wastes".to_string(),
                base_difficulty: 7.5,
                monsters_to_defeat: 20,
                pool: vec![
                    mob("Magma Imp", 70, 16),
                    mob("Ash Wyrm", 100, 17),
                    mob("Salamander", 80, 16),
                ],
                boss: boss("Fire Drake", 120, 18, traits(&[Ice], &[Slash], &[Fire])),
                base_xp: 300,
                base_gold: 150,
                base_materials: 15,
            },
        ];

        Self { zones }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let standard = ZoneCatalog::standard();
        assert!(standard.validate().is_ok());
        assert!(ZoneCatalog::new(standard.zones().to_vec()).is_ok());
    }

    #[test]
    fn test_zone_one_armor_class() {
        let catalog = ZoneCatalog::standard();
        let zone = catalog.get(1).unwrap();
        assert!(zone.pool.iter().all(|m| m.armor_class == 8));
    }

    #[test]
    fn test_total_species() {
        // 5 zones * (3 pool + 1 boss)
        assert_eq!(ZoneCatalog::standard().total_species(), 20);
    }

    #[test]
    fn test_next_zone() {
        let catalog = ZoneCatalog::standard();
        assert_eq!(catalog.next_zone_id(1), Some(2));
        assert_eq!(catalog.next_zone_id(5), None);
        assert_eq!(catalog.first_zone_id(), 1);
    }

    #[test]
    fn test_require_unknown_zone() {
        let catalog = ZoneCatalog::standard();
        assert_eq!(catalog.require(99).unwrap_err(), ContentError::UnknownZone(99));
    }

    #[test]
    fn test_validation_errors() {
        let mut zone = ZoneCatalog::standard().get(1).unwrap().clone();
        zone.pool.clear();
        assert_eq!(
            ZoneCatalog::new(vec![zone.clone()]).unwrap_err(),
            ContentError::EmptyMonsterPool(1)
        );

        let mut zone = ZoneCatalog::standard().get(2).unwrap().clone();
        zone.boss = None;
        assert_eq!(
            ZoneCatalog::new(vec![zone]).unwrap_err(),
            ContentError::MissingBoss(2)
        );

        assert_eq!(ZoneCatalog::new(vec![]).unwrap_err(), ContentError::NoZones);
    }
}
