//! Drives `EncounterController` headless and tallies what happened from its
//! event stream.

use super::config::SimConfig;
use super::report::SimReport;
use crate::buildings::BuildingId;
use crate::character::progression::Character;
use crate::combat::{EncounterController, EncounterEvent};
use crate::core::config::BalanceConfig;
use crate::core::content::ContentCatalog;
use crate::core::dice::GameDice;
use crate::core::error::Result;
use crate::core::game_state::PlayerState;
use crate::items::Item;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Statistics for one simulated playthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub reached_target: bool,
    pub ticks: u64,
    pub seconds: f64,
    pub kills: u64,
    pub boss_kills: u64,
    pub boss_attempts: u64,
    pub boss_timeouts: u64,
    pub attacks: u64,
    pub hits: u64,
    pub total_damage: u64,
    pub items_dropped: u64,
    pub items_equipped: u64,
    pub buildings_bought: u64,
    pub gold_earned: u64,
    pub final_level: u32,
    pub final_zone: u32,
    /// Seconds spent in each zone
    pub zone_seconds: BTreeMap<u32, f64>,
}

impl RunStats {
    fn record(&mut self, event: &EncounterEvent) -> Option<Item> {
        match event {
            EncounterEvent::Attacked { outcome, .. } => {
                self.attacks += 1;
                if outcome.is_hit() {
                    self.hits += 1;
                }
                self.total_damage += outcome.damage as u64;
            }
            EncounterEvent::Died(death) => {
                self.kills += 1;
                self.gold_earned += death.gold_granted;
                if death.is_boss {
                    self.boss_kills += 1;
                }
                if let Some(item) = &death.equipment_dropped {
                    self.items_dropped += 1;
                    return Some(item.clone());
                }
            }
            EncounterEvent::BossStarted { .. } => self.boss_attempts += 1,
            EncounterEvent::BossTimedOut { .. } => self.boss_timeouts += 1,
            _ => {}
        }
        None
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let content = ContentCatalog::standard();
    let balance = BalanceConfig::default();
    let target_zone = config
        .target_zone
        .clamp(content.zones.first_zone_id(), last_zone_id(&content));

    let mut runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let dice = match config.seed {
            Some(seed) => GameDice::seeded(seed.wrapping_add(run_idx as u64)),
            None => GameDice::from_entropy(),
        };
        let stats =
            simulate_single_run(config, target_zone, content.clone(), balance.clone(), dice)?;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Zone {}, Level {}, Kills {}, Boss Kills {}, {:.0}s",
                run_idx + 1,
                config.num_runs,
                stats.final_zone,
                stats.final_level,
                stats.kills,
                stats.boss_kills,
                stats.seconds
            );
        }
        runs.push(stats);
    }

    Ok(SimReport::from_runs(runs, target_zone, config.max_ticks_per_run))
}

fn last_zone_id(content: &ContentCatalog) -> u32 {
    content
        .zones
        .zones()
        .last()
        .map(|z| z.id)
        .unwrap_or_else(|| content.zones.first_zone_id())
}

fn simulate_single_run(
    config: &SimConfig,
    target_zone: u32,
    content: ContentCatalog,
    balance: BalanceConfig,
    dice: GameDice,
) -> Result<RunStats> {
    let player = PlayerState::new(Character::new("Simulated Hero"));
    let mut game = EncounterController::new(player, content, balance, dice)?;
    let mut stats = RunStats::default();

    while stats.ticks < config.max_ticks_per_run {
        stats.ticks += 1;
        let zone = game.player().zones.current_zone_id;
        *stats.zone_seconds.entry(zone).or_insert(0.0) += config.tick_seconds;

        for _ in 0..config.clicks_per_tick {
            game.attack();
        }
        game.tick(config.tick_seconds);

        for event in game.drain_events() {
            if let Some(item) = stats.record(&event) {
                if equip_if_better(&mut game, item) {
                    stats.items_equipped += 1;
                }
            }
        }

        if game.player().zones.clear_count(target_zone) > 1 {
            stats.reached_target = true;
            break;
        }

        spend_ability_points(&mut game);
        if config.buy_buildings {
            stats.buildings_bought += buy_affordable_buildings(&mut game);
        }
        advance_zone(&mut game, target_zone)?;
        game.try_boss();
    }

    stats.seconds = stats.ticks as f64 * config.tick_seconds;
    stats.final_level = game.player().character.level;
    stats.final_zone = game.player().zones.current_zone_id;
    info!(
        reached = stats.reached_target,
        ticks = stats.ticks,
        kills = stats.kills,
        "simulation run finished"
    );
    Ok(stats)
}

fn item_score(item: &Item) -> u32 {
    item.rarity as u32 * 100 + item.level
}

fn equip_if_better(game: &mut EncounterController, item: Item) -> bool {
    let equipment = &mut game.player_mut().equipment;
    let better = equipment
        .get(item.slot)
        .as_ref()
        .map_or(true, |current| item_score(&item) > item_score(current));
    if better {
        equipment.equip(item);
    }
    better
}

fn spend_ability_points(game: &mut EncounterController) {
    let ability = game.get_effective_profile().attack_ability();
    let character = &mut game.player_mut().character;
    while character.unspent_points > 0 {
        if character.allocate_point(ability).is_err() {
            break;
        }
    }
}

fn buy_affordable_buildings(game: &mut EncounterController) -> u64 {
    let mut bought = 0;
    for id in BuildingId::ALL {
        while game.upgrade_building(id).is_ok() {
            bought += 1;
        }
    }
    bought
}

fn advance_zone(game: &mut EncounterController, target_zone: u32) -> Result<()> {
    let current = game.player().zones.current_zone_id;
    if current >= target_zone {
        return Ok(());
    }
    if let Some(next) = game.content().zones.next_zone_id(current) {
        if game.player().zones.is_zone_unlocked(next) {
            game.change_zone(next)?;
        }
    }
    Ok(())
}
