//! The encounter loop: one monster at a time, manual clicks plus auto-attacks,
//! rewards on death, boss gating per zone.

use super::factory::MonsterFactory;
use super::monster::MonsterInstance;
use super::resolver::{AttackInput, AttackOutcome, AttackResolver, AttackRolls, AttackSource};
use super::rewards::compute_rewards;
use crate::bonuses::{Buff, MetaUpgradeId};
use crate::buildings::BuildingId;
use crate::character::prestige::perform_prestige;
use crate::core::config::BalanceConfig;
use crate::core::content::ContentCatalog;
use crate::core::dice::{Dice, GameDice};
use crate::core::error::{ContentError, Result};
use crate::core::game_state::PlayerState;
use crate::effects::{Channel, ChannelMap};
use crate::items::{roll_drop, Item};
use crate::stats::EffectiveProfile;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Reported to observers once per monster instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDeathEvent {
    pub instance_id: u64,
    pub monster_name: String,
    pub is_boss: bool,
    pub zone_id: u32,
    pub xp_granted: u64,
    pub gold_granted: u64,
    pub materials_granted: u64,
    pub equipment_dropped: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEvent {
    Spawned {
        instance_id: u64,
        name: String,
        zone_id: u32,
        is_boss: bool,
        max_hp: u32,
    },
    Attacked {
        instance_id: u64,
        outcome: AttackOutcome,
        remaining_hp: u32,
    },
    Died(MonsterDeathEvent),
    BossUnlocked {
        zone_id: u32,
    },
    BossStarted {
        zone_id: u32,
        instance_id: u64,
        seconds: f64,
    },
    BossTimedOut {
        zone_id: u32,
    },
    ZoneUnlocked {
        zone_id: u32,
    },
    ZoneChanged {
        from: u32,
        to: u32,
    },
    LevelUp {
        level: u32,
    },
}

pub type DeathObserver = Box<dyn FnMut(&MonsterDeathEvent) + Send>;

/// Boss countdown, valid only while `epoch` matches the controller's.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BossTimer {
    epoch: u64,
    remaining: f64,
}

pub struct EncounterController<D: Dice = GameDice> {
    player: PlayerState,
    factory: MonsterFactory,
    resolver: AttackResolver,
    config: BalanceConfig,
    dice: D,
    now: DateTime<Utc>,
    monster: Option<MonsterInstance>,
    /// Bumped on every spawn and zone change.
    epoch: u64,
    kills_in_zone: u32,
    boss_eligible: bool,
    boss_timer: Option<BossTimer>,
    /// Fractional auto-attacks carried between ticks.
    auto_progress: f64,
    events: Vec<EncounterEvent>,
    observers: Vec<DeathObserver>,
}

impl<D: Dice> EncounterController<D> {
    /// Wire validated content to a player and spawn the first monster in the
    /// player's current zone.
    ///
    /// # Arguments
    /// * `player` - Player state; ownership moves into the controller
    /// * `content` - Zones, affixes and buildings
    /// * `config` - Balance values
    /// * `dice` - Random source for every roll
    ///
    /// # Returns
    /// The controller, or a content/config error
    pub fn new(
        player: PlayerState,
        content: ContentCatalog,
        config: BalanceConfig,
        dice: D,
    ) -> Result<Self> {
        config.validate()?;
        content.zones.validate()?;
        let zone_id = player.zones.current_zone_id;
        content.zones.require(zone_id)?;

        let mut controller = Self {
            player,
            factory: MonsterFactory::new(content, &config),
            resolver: AttackResolver::from_config(&config),
            config,
            dice,
            now: Utc::now(),
            monster: None,
            epoch: 0,
            kills_in_zone: 0,
            boss_eligible: false,
            boss_timer: None,
            auto_progress: 0.0,
            events: Vec::new(),
            observers: Vec::new(),
        };
        controller.spawn_next(zone_id)?;
        Ok(controller)
    }

    /// Pin the controller clock. Buff expiry is measured against it.
    pub fn starting_at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn into_player(self) -> PlayerState {
        self.player
    }

    pub fn content(&self) -> &ContentCatalog {
        self.factory.content()
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn current_monster(&self) -> Option<&MonsterInstance> {
        self.monster.as_ref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn kills_in_zone(&self) -> u32 {
        self.kills_in_zone
    }

    pub fn is_boss_eligible(&self) -> bool {
        self.boss_eligible
    }

    /// Seconds left on the boss countdown, if a boss fight is running.
    pub fn boss_time_remaining(&self) -> Option<f64> {
        self.boss_timer
            .filter(|t| t.epoch == self.epoch)
            .map(|t| t.remaining)
    }

    pub fn get_effective_profile(&self) -> EffectiveProfile {
        self.player.effective_profile(self.factory.content(), self.now)
    }

    pub fn get_boosted_channels(&self) -> ChannelMap {
        self.get_effective_profile().boosted_channels()
    }

    /// Auto-attacks per second from the current profile and the AutoSpeed
    /// meta upgrade. Zero without an auto-clicker.
    pub fn auto_attacks_per_second(&self) -> f64 {
        let boosted = self.get_boosted_channels();
        let clickers = boosted.get(Channel::AutoClickerCount).max(0.0);
        if clickers <= 0.0 {
            return 0.0;
        }
        let speed = (1.0 + boosted.get(Channel::AutoSpeed) / 100.0).max(0.0);
        let meta = self.player.meta.factor(MetaUpgradeId::AutoSpeed);
        clickers * self.config.base_auto_attacks_per_second * speed * meta
    }

    /// Register a callback fired once per monster death.
    pub fn subscribe(&mut self, observer: impl FnMut(&MonsterDeathEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Manual attack against the current monster.
    ///
    /// # Returns
    /// The outcome, or None when there is no living monster
    pub fn attack(&mut self) -> Option<AttackOutcome> {
        self.strike(AttackSource::Manual)
    }

    /// Advance the clock by `delta_seconds`: expire buffs, fire due
    /// auto-attacks, then run the boss countdown.
    ///
    /// # Returns
    /// Outcomes of the auto-attacks fired during this tick
    pub fn tick(&mut self, delta_seconds: f64) -> Vec<AttackOutcome> {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.now = Duration::try_milliseconds((delta * 1000.0).round() as i64)
            .and_then(|step| self.now.checked_add_signed(step))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.player.buffs.purge_expired(self.now);

        let outcomes = self.run_auto_attacks(delta);
        self.advance_boss_timer(delta);
        outcomes
    }

    /// Replace the current monster with a fresh normal monster from `zone_id`.
    /// Only the current zone can be spawned from; use [`Self::change_zone`]
    /// to travel. Abandoning a running boss fight keeps the boss unlocked.
    ///
    /// # Returns
    /// Ok(false) when `zone_id` is not the current zone, a content error for
    /// an unknown zone
    pub fn spawn_next(&mut self, zone_id: u32) -> Result<bool> {
        self.factory.content().zones.require(zone_id)?;
        if zone_id != self.player.zones.current_zone_id {
            return Ok(false);
        }
        let clear_count = self.player.zones.clear_count(zone_id);
        let monster = self
            .factory
            .spawn(zone_id, false, clear_count, &mut self.dice)?;
        if self.boss_time_remaining().is_some() {
            self.boss_timer = None;
            self.boss_eligible = true;
            info!(zone_id, "boss fight abandoned");
        }
        self.install(monster);
        Ok(true)
    }

    /// Start the boss fight for the current zone.
    ///
    /// # Returns
    /// false when the boss is not unlocked or already being fought
    pub fn try_boss(&mut self) -> bool {
        if !self.boss_eligible || self.boss_time_remaining().is_some() {
            return false;
        }
        let zone_id = self.player.zones.current_zone_id;
        let clear_count = self.player.zones.clear_count(zone_id);
        let boss = match self.factory.spawn(zone_id, true, clear_count, &mut self.dice) {
            Ok(boss) => boss,
            Err(e) => {
                error!(zone_id, error = %e, "boss spawn failed");
                return false;
            }
        };

        self.boss_eligible = false;
        self.install(boss);
        let seconds = self.config.boss_timer_seconds;
        self.boss_timer = Some(BossTimer {
            epoch: self.epoch,
            remaining: seconds,
        });
        info!(zone_id, seconds, "boss fight started");
        self.events.push(EncounterEvent::BossStarted {
            zone_id,
            instance_id: self.current_instance_id(),
            seconds,
        });
        true
    }

    /// Travel to another zone. Kill progress and boss eligibility are per
    /// zone visit and start over.
    ///
    /// # Returns
    /// Ok(false) for a locked zone, a content error for an unknown one
    pub fn change_zone(&mut self, zone_id: u32) -> Result<bool> {
        self.factory.content().zones.require(zone_id)?;
        let from = self.player.zones.current_zone_id;
        if from == zone_id {
            return Ok(true);
        }
        if !self.player.zones.enter_zone(zone_id) {
            return Ok(false);
        }

        self.reset_zone_visit();
        info!(from, to = zone_id, "zone changed");
        self.events.push(EncounterEvent::ZoneChanged { from, to: zone_id });
        self.spawn_next(zone_id)?;
        Ok(true)
    }

    /// Buy the next level of a building with wallet gold.
    pub fn upgrade_building(&mut self, id: BuildingId) -> Result<(u32, u64)> {
        let player = &mut self.player;
        player
            .town
            .try_upgrade(id, &self.factory.content().buildings, &mut player.wallet.gold)
    }

    /// Buy a meta upgrade with prestige points.
    pub fn purchase_meta_upgrade(&mut self, id: MetaUpgradeId) -> Result<(u32, u64)> {
        let player = &mut self.player;
        player.meta.try_purchase(id, &mut player.wallet.prestige_points)
    }

    pub fn add_buff(&mut self, buff: Buff) {
        self.player.buffs.add(buff);
    }

    /// Prestige the player and restart the encounter in the first zone.
    ///
    /// # Returns
    /// Prestige points granted
    pub fn prestige(&mut self) -> Result<u64> {
        let from = self.player.zones.current_zone_id;
        let points = perform_prestige(&mut self.player)?;
        let to = self.player.zones.current_zone_id;
        self.reset_zone_visit();
        if from != to {
            self.events.push(EncounterEvent::ZoneChanged { from, to });
        }
        self.spawn_next(to)?;
        Ok(points)
    }

    fn reset_zone_visit(&mut self) {
        self.kills_in_zone = 0;
        self.boss_eligible = false;
        self.boss_timer = None;
        self.auto_progress = 0.0;
        self.epoch += 1;
    }

    fn current_instance_id(&self) -> u64 {
        self.monster.as_ref().map(|m| m.instance_id).unwrap_or(0)
    }

    /// Make `monster` the current target and invalidate timers tied to the
    /// previous one.
    fn install(&mut self, monster: MonsterInstance) {
        self.epoch += 1;
        self.auto_progress = 0.0;
        self.player.compendium.record_encounter(&monster.name);
        self.events.push(EncounterEvent::Spawned {
            instance_id: monster.instance_id,
            name: monster.display_name(),
            zone_id: monster.zone_id,
            is_boss: monster.is_boss(),
            max_hp: monster.max_hp,
        });
        self.monster = Some(monster);
    }

    fn respawn(&mut self) {
        let zone_id = self.player.zones.current_zone_id;
        if let Err(e) = self.spawn_next(zone_id) {
            error!(zone_id, error = %e, "respawn failed");
            self.monster = None;
        }
    }

    fn strike(&mut self, source: AttackSource) -> Option<AttackOutcome> {
        let profile = self.get_effective_profile();
        let boosted = profile.boosted_channels();
        let monster = self.monster.as_ref().filter(|m| m.is_alive())?;

        let flat_bonus = match source {
            AttackSource::Manual => boosted.get(Channel::ClickDamage),
            AttackSource::Auto => boosted.get(Channel::AutoDamage),
        };
        let character = &self.player.character;
        let input = AttackInput {
            source,
            level: character.level,
            ability_modifier: profile.attack_modifier(),
            skill_attack_bonus: character.skills.attack_bonus(),
            skill_damage_bonus: character.skills.damage_bonus(),
            flat_bonus,
            crit_chance: boosted.get(Channel::CritChance),
            weapon_type: profile.weapon_type,
            armor_class: monster.armor_class,
            miss_chance: monster.miss_chance(),
            effectiveness: monster.effectiveness(profile.weapon_type),
        };

        let rolls = AttackRolls::roll(&mut self.dice);
        let outcome = self.resolver.resolve_attack(&input, rolls);

        let monster = self.monster.as_mut()?;
        monster.take_damage(outcome.damage);
        let (instance_id, remaining_hp) = (monster.instance_id, monster.current_hp);
        self.events.push(EncounterEvent::Attacked {
            instance_id,
            outcome,
            remaining_hp,
        });

        if remaining_hp == 0 {
            self.settle_death(instance_id);
        }
        Some(outcome)
    }

    /// Grant rewards for a dead monster and move on. Fires at most once per
    /// instance: a second call for the same id is a no-op.
    fn settle_death(&mut self, instance_id: u64) {
        let monster = match self.monster.as_mut() {
            Some(m) if m.instance_id == instance_id && !m.is_alive() && !m.rewarded => m,
            _ => return,
        };
        monster.rewarded = true;
        let monster = monster.clone();
        let zone_id = monster.zone_id;
        let is_boss = monster.is_boss();
        let clear_count = self.player.zones.clear_count(zone_id);
        let boosted = self.get_boosted_channels();

        let (rewards, quota) = match self.factory.content().zones.get(zone_id) {
            Some(zone) => (
                compute_rewards(
                    zone,
                    &monster,
                    clear_count,
                    &boosted,
                    self.factory.scaler(),
                    &self.config,
                ),
                zone.monsters_to_defeat,
            ),
            None => {
                error!(error = %ContentError::UnknownZone(zone_id), "cannot reward kill");
                return;
            }
        };

        let wallet = &mut self.player.wallet;
        wallet.gold = wallet.gold.saturating_add(rewards.gold);
        wallet.materials = wallet.materials.saturating_add(rewards.materials);
        self.player.compendium.record_kill(&monster.name);
        if self.player.character.gain_xp(rewards.xp) > 0 {
            self.events.push(EncounterEvent::LevelUp {
                level: self.player.character.level,
            });
        }

        let equipment_dropped =
            roll_drop(zone_id, is_boss, clear_count, &self.config, &mut self.dice);
        let death = MonsterDeathEvent {
            instance_id,
            monster_name: monster.display_name(),
            is_boss,
            zone_id,
            xp_granted: rewards.xp,
            gold_granted: rewards.gold,
            materials_granted: rewards.materials,
            equipment_dropped,
        };
        info!(
            monster = %death.monster_name,
            is_boss,
            zone_id,
            xp = rewards.xp,
            gold = rewards.gold,
            "monster defeated"
        );
        for observer in &mut self.observers {
            observer(&death);
        }
        self.events.push(EncounterEvent::Died(death));

        if is_boss {
            self.boss_timer = None;
            self.boss_eligible = false;
            self.kills_in_zone = 0;
            let clears = self.player.zones.record_boss_kill(zone_id);
            info!(zone_id, clear_count = clears, "boss defeated");
            if let Some(next) = self.factory.content().zones.next_zone_id(zone_id) {
                if !self.player.zones.is_zone_unlocked(next) {
                    self.player.zones.unlock_zone(next);
                    self.events.push(EncounterEvent::ZoneUnlocked { zone_id: next });
                }
            }
        } else {
            self.kills_in_zone += 1;
            if !self.boss_eligible && self.boss_timer.is_none() && self.kills_in_zone >= quota {
                self.boss_eligible = true;
                info!(zone_id, kills = self.kills_in_zone, "boss unlocked");
                self.events.push(EncounterEvent::BossUnlocked { zone_id });
            }
        }

        self.respawn();
    }

    fn run_auto_attacks(&mut self, delta: f64) -> Vec<AttackOutcome> {
        let rate = self.auto_attacks_per_second();
        if rate <= 0.0 {
            self.auto_progress = 0.0;
            return Vec::new();
        }

        let start_epoch = self.epoch;
        let max_attacks = self.config.max_auto_attacks_per_tick as usize;
        self.auto_progress += delta * rate;

        let mut outcomes = Vec::new();
        while self.auto_progress >= 1.0 && outcomes.len() < max_attacks {
            self.auto_progress -= 1.0;
            match self.strike(AttackSource::Auto) {
                Some(outcome) => outcomes.push(outcome),
                None => {
                    self.auto_progress = 0.0;
                    break;
                }
            }
            // Target replaced: the rest of this tick's time is dropped.
            if self.epoch != start_epoch {
                self.auto_progress = 0.0;
                break;
            }
        }
        if self.auto_progress >= 1.0 {
            self.auto_progress = self.auto_progress.fract();
        }
        outcomes
    }

    fn advance_boss_timer(&mut self, delta: f64) {
        let Some(mut timer) = self.boss_timer.take() else {
            return;
        };
        if timer.epoch != self.epoch {
            return;
        }
        timer.remaining -= delta;
        if timer.remaining > 0.0 {
            self.boss_timer = Some(timer);
            return;
        }

        let zone_id = self.player.zones.current_zone_id;
        self.boss_eligible = true;
        info!(zone_id, "boss fight timed out");
        self.events.push(EncounterEvent::BossTimedOut { zone_id });
        self.respawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::Town;
    use crate::character::progression::Character;
    use crate::core::dice::ScriptedDice;
    use crate::core::error::EngineError;
    use crate::effects::Effect;
    use std::sync::{Arc, Mutex};

    fn controller(dice: ScriptedDice) -> EncounterController<ScriptedDice> {
        EncounterController::new(
            PlayerState::new(Character::new("Hero")),
            ContentCatalog::standard(),
            BalanceConfig::default(),
            dice,
        )
        .unwrap()
    }

    fn kill_current(c: &mut EncounterController<ScriptedDice>) {
        let id = c.current_monster().unwrap().instance_id;
        while c.current_monster().map(|m| m.instance_id) == Some(id) {
            c.attack();
        }
    }

    #[test]
    fn test_first_monster_spawned() {
        let mut c = controller(ScriptedDice::new());
        let monster = c.current_monster().unwrap();
        assert_eq!(monster.name, "Slime");
        assert_eq!(monster.max_hp, 20);
        assert_eq!(c.player().compendium.entry("Slime").unwrap().encountered, 1);
        assert!(matches!(
            c.drain_events().as_slice(),
            [EncounterEvent::Spawned { zone_id: 1, is_boss: false, .. }]
        ));
    }

    #[test]
    fn test_manual_attack_level_one_hits_for_seven() {
        let mut c = controller(ScriptedDice::always(7));
        let outcome = c.attack().unwrap();
        assert!(outcome.is_hit());
        assert_eq!(outcome.damage, 7);
        assert_eq!(c.current_monster().unwrap().current_hp, 13);
    }

    #[test]
    fn test_kill_grants_rewards_once() {
        let mut c = controller(ScriptedDice::always(15));
        let deaths = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&deaths);
        c.subscribe(move |e| sink.lock().unwrap().push(e.clone()));

        let first_id = c.current_monster().unwrap().instance_id;
        kill_current(&mut c);

        let gold = c.player().wallet.gold;
        assert_eq!(gold, 5);
        assert_eq!(c.player().character.xp, 10);

        // Settling the same instance again changes nothing
        c.settle_death(first_id);
        assert_eq!(c.player().wallet.gold, gold);
        assert_eq!(deaths.lock().unwrap().len(), 1);
        assert_eq!(deaths.lock().unwrap()[0].monster_name, "Slime");
        assert_eq!(c.player().compendium.lifetime_kills(), 1);
        assert_ne!(c.current_monster().unwrap().instance_id, first_id);
    }

    #[test]
    fn test_rewarded_flag_blocks_second_settlement() {
        let mut c = controller(ScriptedDice::always(15));
        let id = {
            let m = c.monster.as_mut().unwrap();
            m.current_hp = 0;
            m.rewarded = true;
            m.instance_id
        };
        c.settle_death(id);
        assert_eq!(c.player().wallet.gold, 0);
        assert_eq!(c.current_monster().unwrap().instance_id, id);
    }

    #[test]
    fn test_attack_dead_monster_is_noop() {
        let mut c = controller(ScriptedDice::always(15));
        c.monster.as_mut().unwrap().current_hp = 0;
        c.monster.as_mut().unwrap().rewarded = true;
        assert!(c.attack().is_none());
        c.monster = None;
        assert!(c.attack().is_none());
    }

    #[test]
    fn test_zero_clickers_zero_auto_attacks() {
        let mut c = controller(ScriptedDice::always(15));
        assert_eq!(c.auto_attacks_per_second(), 0.0);
        assert!(c.tick(60.0).is_empty());
        assert_eq!(c.current_monster().unwrap().current_hp, 20);
    }

    #[test]
    fn test_auto_attacks_follow_clicker_rate() {
        let mut c = controller(ScriptedDice::always(15));
        // Workshop level 2 -> 2 clickers -> 1 attack per second
        c.player_mut().town = Town::with_levels(&[(crate::buildings::BuildingId::Workshop, 2)]);
        assert!((c.auto_attacks_per_second() - 1.0).abs() < 1e-9);

        let outcomes = c.tick(1.5);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].source, AttackSource::Auto);
        assert!(!outcomes[0].is_crit);
        // Leftover half attack carries into the next tick
        assert_eq!(c.tick(0.5).len(), 1);
    }

    #[test]
    fn test_auto_attacks_stop_when_target_replaced() {
        let mut c = controller(ScriptedDice::always(15));
        c.player_mut().town = Town::with_levels(&[(crate::buildings::BuildingId::Workshop, 20)]);
        // 10 attacks/s for 10s, but the 20hp slime dies on the third hit
        let outcomes = c.tick(10.0);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(c.current_monster().unwrap().current_hp, 20);
        assert_eq!(c.player().compendium.lifetime_kills(), 1);
    }

    #[test]
    fn test_auto_attacks_capped_per_tick() {
        let mut c = controller(ScriptedDice::always(1));
        c.player_mut().town = Town::with_levels(&[(crate::buildings::BuildingId::Workshop, 10)]);
        // Natural 1s never kill, so only the cap limits the count
        let outcomes = c.tick(1_000.0);
        assert_eq!(outcomes.len(), 50);
    }

    #[test]
    fn test_auto_speed_upgrade_raises_rate() {
        let mut c = controller(ScriptedDice::always(15));
        c.player_mut().town = Town::with_levels(&[(BuildingId::Workshop, 2)]);
        assert!((c.auto_attacks_per_second() - 1.0).abs() < 1e-9);

        c.player_mut().wallet.prestige_points = 100;
        for _ in 0..5 {
            c.purchase_meta_upgrade(MetaUpgradeId::AutoSpeed).unwrap();
        }
        // 5 levels at +5% each
        assert!((c.auto_attacks_per_second() - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_huge_tick_saturates_clock() {
        let mut c = controller(ScriptedDice::always(15));
        c.tick(1e13);
        assert_eq!(c.now(), DateTime::<Utc>::MAX_UTC);
        c.tick(f64::MAX);
        assert_eq!(c.now(), DateTime::<Utc>::MAX_UTC);
        assert!(c.current_monster().unwrap().is_alive());
    }

    #[test]
    fn test_boss_unlocks_after_quota() {
        let mut c = controller(ScriptedDice::always(15));
        assert!(!c.try_boss());
        for _ in 0..10 {
            kill_current(&mut c);
        }
        assert!(c.is_boss_eligible());
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, EncounterEvent::BossUnlocked { zone_id: 1 })));
        assert!(!c.current_monster().unwrap().is_boss());

        assert!(c.try_boss());
        assert!(c.current_monster().unwrap().is_boss());
        assert_eq!(c.boss_time_remaining(), Some(30.0));
        assert!(!c.try_boss());
    }

    #[test]
    fn test_boss_timeout_reverts_and_restores_eligibility() {
        let mut c = controller(ScriptedDice::always(15));
        for _ in 0..10 {
            kill_current(&mut c);
        }
        assert!(c.try_boss());
        let boss_id = c.current_monster().unwrap().instance_id;

        c.tick(29.0);
        assert_eq!(c.current_monster().unwrap().instance_id, boss_id);
        c.tick(1.0);

        let monster = c.current_monster().unwrap();
        assert!(!monster.is_boss());
        assert_ne!(monster.instance_id, boss_id);
        assert!(c.is_boss_eligible());
        assert_eq!(c.boss_time_remaining(), None);
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, EncounterEvent::BossTimedOut { zone_id: 1 })));
        // Free retry
        assert!(c.try_boss());
    }

    #[test]
    fn test_boss_kill_advances_zone_progress() {
        let mut c = controller(ScriptedDice::always(20));
        for _ in 0..10 {
            kill_current(&mut c);
        }
        assert!(c.try_boss());
        kill_current(&mut c);

        assert_eq!(c.player().zones.clear_count(1), 2);
        assert!(c.player().zones.is_zone_unlocked(2));
        assert!(!c.is_boss_eligible());
        assert_eq!(c.kills_in_zone(), 0);
        assert_eq!(c.boss_time_remaining(), None);
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, EncounterEvent::ZoneUnlocked { zone_id: 2 })));
    }

    #[test]
    fn test_change_zone() {
        let mut c = controller(ScriptedDice::always(15));
        assert!(!c.change_zone(2).unwrap());
        assert!(matches!(
            c.change_zone(99),
            Err(EngineError::Content(ContentError::UnknownZone(99)))
        ));

        c.player_mut().zones.unlock_zone(2);
        let epoch = c.epoch();
        assert!(c.change_zone(2).unwrap());
        assert!(c.epoch() > epoch);
        assert_eq!(c.player().zones.current_zone_id, 2);
        assert_eq!(c.current_monster().unwrap().zone_id, 2);
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, EncounterEvent::ZoneChanged { from: 1, to: 2 })));
    }

    #[test]
    fn test_change_zone_cancels_boss_fight() {
        let mut c = controller(ScriptedDice::always(15));
        for _ in 0..10 {
            kill_current(&mut c);
        }
        assert!(c.try_boss());
        c.player_mut().zones.unlock_zone(2);
        c.change_zone(2).unwrap();
        assert_eq!(c.boss_time_remaining(), None);
        assert!(!c.is_boss_eligible());
        c.tick(60.0);
        assert!(!c.current_monster().unwrap().is_boss());
    }

    #[test]
    fn test_spawn_next_only_from_current_zone() {
        let mut c = controller(ScriptedDice::always(15));
        let id = c.current_monster().unwrap().instance_id;

        assert!(!c.spawn_next(5).unwrap());
        c.player_mut().zones.unlock_zone(2);
        assert!(!c.spawn_next(2).unwrap());
        assert!(matches!(
            c.spawn_next(99),
            Err(EngineError::Content(ContentError::UnknownZone(99)))
        ));
        assert_eq!(c.current_monster().unwrap().instance_id, id);

        assert!(c.spawn_next(1).unwrap());
        let monster = c.current_monster().unwrap();
        assert_eq!(monster.zone_id, 1);
        assert_ne!(monster.instance_id, id);
    }

    #[test]
    fn test_spawn_next_during_boss_keeps_boss_unlocked() {
        let mut c = controller(ScriptedDice::always(15));
        for _ in 0..10 {
            kill_current(&mut c);
        }
        assert!(c.try_boss());
        assert!(!c.is_boss_eligible());

        assert!(c.spawn_next(1).unwrap());
        assert!(!c.current_monster().unwrap().is_boss());
        assert!(c.is_boss_eligible());
        assert_eq!(c.boss_time_remaining(), None);
        assert!(c.try_boss());
        assert!(c.current_monster().unwrap().is_boss());
    }

    #[test]
    fn test_buffs_expire_on_tick() {
        let mut c = controller(ScriptedDice::always(15));
        let now = c.now();
        c.add_buff(Buff::lasting("rage", vec![Effect::add(Channel::ClickDamage, 5.0)], now, 10));
        assert_eq!(c.get_boosted_channels().get(Channel::ClickDamage), 5.0);
        c.tick(11.0);
        assert!(c.player().buffs.is_empty());
        assert_eq!(c.get_boosted_channels().get(Channel::ClickDamage), 0.0);
    }

    #[test]
    fn test_level_up_event() {
        let mut c = controller(ScriptedDice::always(15));
        c.player_mut().character.xp = 95;
        kill_current(&mut c);
        assert_eq!(c.player().character.level, 2);
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, EncounterEvent::LevelUp { level: 2 })));
    }

    #[test]
    fn test_upgrade_building_spends_gold() {
        let mut c = controller(ScriptedDice::always(15));
        assert!(matches!(
            c.upgrade_building(BuildingId::Blacksmith),
            Err(EngineError::InsufficientFunds { .. })
        ));
        c.player_mut().wallet.gold = 100;
        let (level, cost) = c.upgrade_building(BuildingId::Blacksmith).unwrap();
        assert_eq!(level, 1);
        assert_eq!(c.player().wallet.gold, 100 - cost);
        assert_eq!(c.get_boosted_channels().get(Channel::ClickDamage), 1.0);
    }

    #[test]
    fn test_prestige_restarts_in_first_zone() {
        let mut c = controller(ScriptedDice::always(15));
        c.player_mut().character.level = 10;
        c.player_mut().zones.unlock_zone(2);
        c.change_zone(2).unwrap();

        let points = c.prestige().unwrap();
        assert_eq!(points, 1);
        assert_eq!(c.player().zones.current_zone_id, 1);
        assert_eq!(c.current_monster().unwrap().zone_id, 1);
        assert!(c.prestige().is_err());
    }
}
