//! Prestige: trade a run's progress for permanent prestige points.

use crate::core::constants::{PRESTIGE_BASE_LEVEL, PRESTIGE_LEVEL_STEP};
use crate::core::error::{EngineError, Result};
use crate::core::game_state::PlayerState;
use tracing::info;

/// Character level needed for the next prestige.
///
/// # Arguments
/// * `prestige_count` - Prestiges already performed
///
/// # Returns
/// `10 + 5 * prestige_count`
pub fn prestige_required_level(prestige_count: u32) -> u32 {
    PRESTIGE_BASE_LEVEL + PRESTIGE_LEVEL_STEP * prestige_count
}

/// Checks if the player can prestige
pub fn can_prestige(state: &PlayerState) -> bool {
    state.character.level >= prestige_required_level(state.prestige_count)
}

/// Points a prestige would grant right now: one plus every extra zone clear.
pub fn prestige_points_available(state: &PlayerState) -> u64 {
    1 + state.zones.extra_clears()
}

/// Performs a prestige.
///
/// Resets character level and XP, building levels, zone progress and gold.
/// Equipment, meta upgrades, compendium, materials and ability scores carry
/// over.
///
/// # Returns
/// Prestige points granted
pub fn perform_prestige(state: &mut PlayerState) -> Result<u64> {
    if !can_prestige(state) {
        return Err(EngineError::PrestigeNotAvailable {
            required_level: prestige_required_level(state.prestige_count),
            current_level: state.character.level,
        });
    }

    let points = prestige_points_available(state);
    state.wallet.prestige_points = state.wallet.prestige_points.saturating_add(points);
    state.wallet.gold = 0;
    state.prestige_count += 1;

    state.character.reset_level();
    state.town.reset();
    state.zones.reset_for_prestige();

    info!(
        character = %state.character.name,
        prestige_count = state.prestige_count,
        points,
        "prestige performed"
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonuses::MetaUpgradeId;
    use crate::buildings::{BuildingId, Town};
    use crate::character::progression::Character;
    use crate::items::{EquipmentSlot, Item, Rarity};

    fn leveled_state(level: u32) -> PlayerState {
        let mut state = PlayerState::new(Character::new("Hero"));
        state.character.level = level;
        state
    }

    #[test]
    fn test_required_level() {
        assert_eq!(prestige_required_level(0), 10);
        assert_eq!(prestige_required_level(1), 15);
        assert_eq!(prestige_required_level(4), 30);
    }

    #[test]
    fn test_cannot_prestige_below_level() {
        let mut state = leveled_state(9);
        assert!(!can_prestige(&state));
        assert!(matches!(
            perform_prestige(&mut state),
            Err(EngineError::PrestigeNotAvailable {
                required_level: 10,
                current_level: 9
            })
        ));
        assert_eq!(state.prestige_count, 0);
    }

    #[test]
    fn test_points_count_extra_clears() {
        let mut state = leveled_state(10);
        state.zones.record_boss_kill(1);
        state.zones.record_boss_kill(1);
        state.zones.record_boss_kill(2);
        // 1 + (3 - 1) + (2 - 1)
        assert_eq!(prestige_points_available(&state), 4);
        assert_eq!(perform_prestige(&mut state).unwrap(), 4);
        assert_eq!(state.wallet.prestige_points, 4);
    }

    #[test]
    fn test_prestige_resets_run_progress() {
        let mut state = leveled_state(12);
        state.character.xp = 300;
        state.wallet.gold = 5_000;
        state.wallet.materials = 40;
        state.town = Town::with_levels(&[(BuildingId::Blacksmith, 3)]);
        state.zones.unlock_zone(2);
        state.zones.enter_zone(2);
        state.zones.record_boss_kill(2);

        perform_prestige(&mut state).unwrap();

        assert_eq!(state.prestige_count, 1);
        assert_eq!(state.character.level, 1);
        assert_eq!(state.character.xp, 0);
        assert_eq!(state.wallet.gold, 0);
        assert_eq!(state.wallet.materials, 40);
        assert_eq!(state.town.level(BuildingId::Blacksmith), 0);
        assert_eq!(state.zones.current_zone_id, 1);
        assert!(!state.zones.is_zone_unlocked(2));
        assert_eq!(state.zones.clear_count(2), 1);
    }

    #[test]
    fn test_prestige_keeps_permanent_progress() {
        let mut state = leveled_state(10);
        state.equipment.equip(Item::new(EquipmentSlot::Weapon, Rarity::Rare, 10, "Blade"));
        state.compendium.record_kill("Slime");
        state.wallet.prestige_points = 10;
        state
            .meta
            .try_purchase(MetaUpgradeId::GlobalDamage, &mut state.wallet.prestige_points)
            .unwrap();

        perform_prestige(&mut state).unwrap();

        assert!(state.equipment.get(EquipmentSlot::Weapon).is_some());
        assert_eq!(state.compendium.lifetime_kills(), 1);
        assert_eq!(state.meta.level(MetaUpgradeId::GlobalDamage), 1);
    }

    #[test]
    fn test_second_prestige_needs_higher_level() {
        let mut state = leveled_state(10);
        perform_prestige(&mut state).unwrap();
        state.character.level = 14;
        assert!(!can_prestige(&state));
        state.character.level = 15;
        assert!(can_prestige(&state));
    }
}
