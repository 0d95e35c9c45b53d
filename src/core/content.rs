//! Static game content bundled for the engine: zones, monster affixes and
//! town buildings. Built and validated before any player state is wired in.

use crate::buildings::BuildingCatalog;
use crate::combat::monster::{standard_affixes, MonsterAffix};
use crate::core::error::ContentError;
use crate::zones::{ZoneCatalog, ZoneDef};

#[derive(Debug, Clone)]
pub struct ContentCatalog {
    pub zones: ZoneCatalog,
    pub affixes: Vec<MonsterAffix>,
    pub buildings: BuildingCatalog,
}

impl ContentCatalog {
    pub fn new(
        zones: Vec<ZoneDef>,
        affixes: Vec<MonsterAffix>,
        buildings: BuildingCatalog,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            zones: ZoneCatalog::new(zones)?,
            affixes,
            buildings,
        })
    }

    pub fn standard() -> Self {
        Self {
            zones: ZoneCatalog::standard(),
            affixes: standard_affixes(),
            buildings: BuildingCatalog::standard(),
        }
    }

    pub fn total_species(&self) -> usize {
        self.zones.total_species()
    }
}
