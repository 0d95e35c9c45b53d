//! Integration test: Complete prestige cycle
//!
//! Tests the full flow: clear a zone → reach the level gate → prestige →
//! spend points → start over with the permanent bonus

use idle_quest::bonuses::MetaUpgradeId;
use idle_quest::buildings::BuildingId;
use idle_quest::character::{can_prestige, prestige_required_level, xp_for_next_level, Character};
use idle_quest::combat::EncounterController;
use idle_quest::core::{BalanceConfig, ContentCatalog, EngineError, PlayerState, ScriptedDice};
use idle_quest::effects::Channel;
use idle_quest::items::{EquipmentSlot, Item, Rarity};

fn game() -> EncounterController<ScriptedDice> {
    EncounterController::new(
        PlayerState::new(Character::new("Integration Test Hero")),
        ContentCatalog::standard(),
        BalanceConfig::default(),
        ScriptedDice::always(20),
    )
    .unwrap()
}

fn kill_current(game: &mut EncounterController<ScriptedDice>) {
    let id = game.current_monster().unwrap().instance_id;
    while game.current_monster().map(|m| m.instance_id) == Some(id) {
        game.attack();
    }
}

fn clear_current_zone(game: &mut EncounterController<ScriptedDice>) {
    while !game.is_boss_eligible() {
        kill_current(game);
    }
    assert!(game.try_boss());
    kill_current(game);
}

#[test]
fn test_complete_prestige_cycle_first_prestige() {
    let mut game = game();
    assert!(!can_prestige(game.player()));

    clear_current_zone(&mut game);
    clear_current_zone(&mut game);
    assert_eq!(game.player().zones.clear_count(1), 3);

    // Grant the XP for level 10 directly
    let needed: u64 = (1..10).map(xp_for_next_level).sum();
    let gained = game.player_mut().character.gain_xp(needed);
    assert!(gained > 0);
    assert!(game.player().character.level >= prestige_required_level(0));
    assert!(can_prestige(game.player()));

    game.player_mut().wallet.gold = 1_000;
    game.upgrade_building(BuildingId::Blacksmith).unwrap();
    game.player_mut()
        .equipment
        .equip(Item::new(EquipmentSlot::Amulet, Rarity::Epic, 10, "Keepsake"));
    let kills_before = game.player().compendium.lifetime_kills();

    // 1 + (3 - 1) extra clears
    let points = game.prestige().unwrap();
    assert_eq!(points, 3);

    let player = game.player();
    assert_eq!(player.prestige_count, 1);
    assert_eq!(player.character.level, 1);
    assert_eq!(player.character.xp, 0);
    assert_eq!(player.wallet.gold, 0);
    assert_eq!(player.wallet.prestige_points, 3);
    assert_eq!(player.town.level(BuildingId::Blacksmith), 0);
    assert_eq!(player.zones.clear_count(1), 1);
    assert!(!player.zones.is_zone_unlocked(2));
    assert!(player.equipment.get(EquipmentSlot::Amulet).is_some());
    assert_eq!(player.compendium.lifetime_kills(), kills_before);
    assert!(!game.is_boss_eligible());
    assert_eq!(game.kills_in_zone(), 0);

    // Fresh zone-1 monster at clear count 1
    let monster = game.current_monster().unwrap();
    assert_eq!(monster.zone_id, 1);
    assert_eq!(monster.max_hp, 20);
}

#[test]
fn test_meta_upgrade_survives_and_boosts() {
    let mut game = game();
    game.player_mut().character.level = 10;
    game.prestige().unwrap();

    let (level, cost) = game.purchase_meta_upgrade(MetaUpgradeId::GlobalDamage).unwrap();
    assert_eq!(level, 1);
    assert_eq!(cost, 1);
    assert_eq!(game.player().wallet.prestige_points, 0);
    assert!(matches!(
        game.purchase_meta_upgrade(MetaUpgradeId::GlobalDamage),
        Err(EngineError::InsufficientFunds { .. })
    ));

    game.player_mut().wallet.gold = 1_000;
    game.upgrade_building(BuildingId::Blacksmith).unwrap();
    // Blacksmith +1 click damage, x1.1 from the meta upgrade
    let click = game.get_boosted_channels().get(Channel::ClickDamage);
    assert!((click - 1.1).abs() < 1e-9);

    // Second prestige needs level 15
    game.player_mut().character.level = 14;
    assert!(matches!(
        game.prestige(),
        Err(EngineError::PrestigeNotAvailable {
            required_level: 15,
            current_level: 14
        })
    ));
    game.player_mut().character.level = 15;
    game.prestige().unwrap();
    assert_eq!(
        game.player().meta.level(MetaUpgradeId::GlobalDamage),
        1
    );
}
