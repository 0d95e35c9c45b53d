//! Building effect calculation and upgrade purchasing.

use super::types::{BuildingCatalog, BuildingId, Town};
use crate::core::error::{EngineError, Result};
use crate::effects::{ChannelAccumulator, ChannelMap, EffectOp};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fold owned buildings into a channel map.
///
/// 1. Base pass: each effect contributes `value * level`.
/// 2. Synergy pass: a synergy fires when its required building is owned at
///    `min_level` or higher. `Add` scales with the owner's level, `Multiply`
///    does not.
/// 3. Each channel's product is applied to its finished sum.
///
/// Not cached; recomputed on every call.
pub fn compute_building_effects(
    owned: impl IntoIterator<Item = (BuildingId, u32)>,
    catalog: &BuildingCatalog,
) -> ChannelMap {
    let levels: HashMap<BuildingId, u32> = owned
        .into_iter()
        .filter(|(_, level)| *level > 0)
        .collect();

    let mut acc = ChannelAccumulator::new();

    for (&id, &level) in &levels {
        let Some(def) = catalog.get(id) else {
            warn!(building = ?id, "owned building missing from catalog, skipping");
            continue;
        };
        for effect in &def.effects {
            acc.apply(&effect.scaled(level as f64));
        }
    }

    for (&id, &level) in &levels {
        let Some(def) = catalog.get(id) else {
            continue;
        };
        for synergy in &def.synergies {
            let required = levels.get(&synergy.requires).copied().unwrap_or(0);
            if required == 0 || required < synergy.min_level {
                continue;
            }
            match synergy.effect.op {
                EffectOp::Add => acc.apply(&synergy.effect.scaled(level as f64)),
                EffectOp::Multiply => acc.apply(&synergy.effect),
            }
        }
    }

    acc.finalize()
}

impl Town {
    /// Building effects for this town against `catalog`.
    pub fn effects(&self, catalog: &BuildingCatalog) -> ChannelMap {
        compute_building_effects(self.owned(), catalog)
    }

    /// Gold cost of the next level, or None if maxed or unknown.
    pub fn upgrade_cost(&self, id: BuildingId, catalog: &BuildingCatalog) -> Option<u64> {
        catalog.get(id)?.upgrade_cost(self.level(id))
    }

    /// Buy the next level of a building with gold.
    /// Returns (new_level, gold_spent) on success.
    pub fn try_upgrade(
        &mut self,
        id: BuildingId,
        catalog: &BuildingCatalog,
        gold: &mut u64,
    ) -> Result<(u32, u64)> {
        let level = self.level(id);
        let max_level = catalog.get(id).map(|d| d.max_level).unwrap_or(0);
        let cost = self
            .upgrade_cost(id, catalog)
            .ok_or_else(|| EngineError::MaxLevel {
                what: id.name().to_string(),
                max_level,
            })?;
        if *gold < cost {
            return Err(EngineError::InsufficientFunds {
                currency: "gold",
                needed: cost,
                available: *gold,
            });
        }
        *gold -= cost;
        self.set_level(id, level + 1);
        debug!(building = id.name(), level = level + 1, cost, "building upgraded");
        Ok((level + 1, cost))
    }

    /// Prestige reset: every building back to level 0.
    pub fn reset(&mut self) {
        for id in BuildingId::ALL {
            self.set_level(id, 0);
        }
    }
}
