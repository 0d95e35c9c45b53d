//! d20 attack resolution.
//!
//! Pure: every random input arrives through [`AttackRolls`], so an outcome
//! is fully determined by `(AttackInput, AttackRolls)`.

use crate::core::config::BalanceConfig;
use crate::core::constants::{NATURAL_CRIT, NATURAL_MISS, PROFICIENCY_LEVEL_STEP};
use crate::core::dice::Dice;
use crate::items::WeaponType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Proficiency bonus: `floor(level / 4) + 1`.
pub fn proficiency_bonus(level: u32) -> i32 {
    (level / PROFICIENCY_LEVEL_STEP) as i32 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackSource {
    /// Player click. Uses click damage and can crit.
    Manual,
    /// Auto-clicker. Uses auto damage and never crits.
    Auto,
}

impl AttackSource {
    pub fn crit_capable(&self) -> bool {
        matches!(self, AttackSource::Manual)
    }
}

/// Everything the resolver needs about attacker and target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackInput {
    pub source: AttackSource,
    pub level: u32,
    pub ability_modifier: i32,
    pub skill_attack_bonus: i32,
    pub skill_damage_bonus: f64,
    /// Boosted click or auto damage.
    pub flat_bonus: f64,
    /// Boosted crit chance, in percent.
    pub crit_chance: f64,
    pub weapon_type: Option<WeaponType>,
    pub armor_class: u32,
    pub miss_chance: f64,
    /// Boss weapon effectiveness; 1.0 for regular monsters.
    pub effectiveness: f64,
}

impl AttackInput {
    pub fn attack_bonus(&self) -> i32 {
        proficiency_bonus(self.level) + self.ability_modifier + self.skill_attack_bonus
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRolls {
    pub d20: u32,
    pub crit_roll: f64,
    pub evade_roll: f64,
}

impl AttackRolls {
    /// d20 first, then crit and evade draws.
    pub fn roll(dice: &mut impl Dice) -> Self {
        let d20 = dice.d20();
        let crit_roll = dice.chance();
        let evade_roll = dice.chance();
        Self {
            d20,
            crit_roll,
            evade_roll,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitResult {
    Miss,
    /// Roll hit but the target's affix dodged it.
    Evaded,
    /// Hit for zero or negative raw damage.
    NoDamage,
    Hit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub source: AttackSource,
    pub result: HitResult,
    pub damage: u32,
    pub is_crit: bool,
    pub d20: u32,
    pub attack_total: i32,
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self.result, HitResult::Hit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackResolver {
    base_damage: f64,
    damage_per_level: f64,
    modifier_scale_per_level: f64,
    crit_multiplier: f64,
    min_chance: f64,
    max_chance: f64,
}

impl Default for AttackResolver {
    fn default() -> Self {
        Self::from_config(&BalanceConfig::default())
    }
}

impl AttackResolver {
    pub fn from_config(config: &BalanceConfig) -> Self {
        Self {
            base_damage: config.base_damage,
            damage_per_level: config.damage_per_level,
            modifier_scale_per_level: config.modifier_scale_per_level,
            crit_multiplier: config.crit_multiplier,
            min_chance: config.min_chance,
            max_chance: config.max_chance,
        }
    }

    fn clamp_chance(&self, p: f64) -> f64 {
        p.clamp(self.min_chance, self.max_chance)
    }

    /// Raw damage before crit and boss effectiveness.
    ///
    /// `base + per_level * level + modifier * (1 + level * scale) + flat + skill`
    pub fn raw_damage(&self, input: &AttackInput) -> f64 {
        let level = input.level as f64;
        self.base_damage
            + self.damage_per_level * level
            + input.ability_modifier as f64 * (1.0 + level * self.modifier_scale_per_level)
            + input.flat_bonus
            + input.skill_damage_bonus
    }

    /// Resolve one attack.
    ///
    /// # Arguments
    /// * `input` - Attacker and target snapshot
    /// * `rolls` - Pre-drawn d20, crit and evade rolls
    ///
    /// # Returns
    /// The outcome with final damage (already floored and scaled by boss
    /// effectiveness)
    pub fn resolve_attack(&self, input: &AttackInput, rolls: AttackRolls) -> AttackOutcome {
        let natural = rolls.d20;
        let attack_total = natural as i32 + input.attack_bonus();
        let outcome = |result, damage, is_crit| AttackOutcome {
            source: input.source,
            result,
            damage,
            is_crit,
            d20: natural,
            attack_total,
        };

        let hits = if natural == NATURAL_CRIT {
            true
        } else if natural == NATURAL_MISS {
            false
        } else {
            attack_total >= input.armor_class as i32
        };
        if !hits {
            debug!(natural, attack_total, ac = input.armor_class, "attack missed");
            return outcome(HitResult::Miss, 0, false);
        }

        if natural != NATURAL_CRIT
            && input.miss_chance > 0.0
            && rolls.evade_roll < self.clamp_chance(input.miss_chance)
        {
            debug!(natural, "attack evaded");
            return outcome(HitResult::Evaded, 0, false);
        }

        let is_crit = input.source.crit_capable()
            && (natural == NATURAL_CRIT
                || (input.crit_chance > 0.0
                    && rolls.crit_roll < self.clamp_chance(input.crit_chance / 100.0)));

        let mut raw = self.raw_damage(input);
        if is_crit {
            raw *= self.crit_multiplier;
        }
        if raw <= 0.0 {
            debug!(raw, "attack connected for no damage");
            return outcome(HitResult::NoDamage, 0, is_crit);
        }

        let mut damage = raw.floor().clamp(1.0, u32::MAX as f64) as u32;
        if input.effectiveness != 1.0 {
            damage = (damage as f64 * input.effectiveness).floor().max(0.0) as u32;
        }

        outcome(HitResult::Hit, damage, is_crit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::monster::BossTraits;

    fn level_one() -> AttackInput {
        AttackInput {
            source: AttackSource::Manual,
            level: 1,
            ability_modifier: 0,
            skill_attack_bonus: 0,
            skill_damage_bonus: 0.0,
            flat_bonus: 0.0,
            crit_chance: 0.0,
            weapon_type: None,
            armor_class: 8,
            miss_chance: 0.0,
            effectiveness: 1.0,
        }
    }

    fn rolls(d20: u32) -> AttackRolls {
        roll_set(d20, 0.99, 0.99)
    }

    fn roll_set(d20: u32, crit_roll: f64, evade_roll: f64) -> AttackRolls {
        AttackRolls {
            d20,
            crit_roll,
            evade_roll,
        }
    }

    #[test]
    fn test_proficiency_bonus() {
        assert_eq!(proficiency_bonus(1), 1);
        assert_eq!(proficiency_bonus(3), 1);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(0), 1);
    }

    #[test]
    fn test_level_one_versus_zone_one() {
        let resolver = AttackResolver::default();
        let input = level_one();
        assert_eq!(input.attack_bonus(), 1);

        let hit = resolver.resolve_attack(&input, rolls(7));
        assert_eq!(hit.result, HitResult::Hit);
        assert_eq!(hit.damage, 7);
        assert!(!hit.is_crit);

        let miss = resolver.resolve_attack(&input, rolls(6));
        assert_eq!(miss.result, HitResult::Miss);
        assert_eq!(miss.damage, 0);
    }

    #[test]
    fn test_hit_boundary() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            ability_modifier: 3,
            level: 5,
            armor_class: 15,
            ..level_one()
        };
        // bonus = 2 + 3 = 5
        let needed = 15 - input.attack_bonus() as u32;
        assert!(resolver.resolve_attack(&input, rolls(needed)).is_hit());
        assert!(!resolver.resolve_attack(&input, rolls(needed - 1)).is_hit());
    }

    #[test]
    fn test_natural_twenty_hits_and_crits() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            armor_class: 50,
            ..level_one()
        };
        let outcome = resolver.resolve_attack(&input, rolls(20));
        assert_eq!(outcome.result, HitResult::Hit);
        assert!(outcome.is_crit);
        assert_eq!(outcome.damage, 14);
    }

    #[test]
    fn test_natural_one_always_misses() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            armor_class: 0,
            skill_attack_bonus: 30,
            ..level_one()
        };
        assert_eq!(resolver.resolve_attack(&input, rolls(1)).result, HitResult::Miss);
    }

    #[test]
    fn test_auto_attack_natural_twenty_does_not_crit() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            source: AttackSource::Auto,
            armor_class: 50,
            crit_chance: 100.0,
            ..level_one()
        };
        let outcome = resolver.resolve_attack(&input, roll_set(20, 0.0, 0.99));
        assert!(outcome.is_hit());
        assert!(!outcome.is_crit);
        assert_eq!(outcome.damage, 7);
    }

    #[test]
    fn test_crit_chance_clamped() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            crit_chance: 500.0,
            ..level_one()
        };
        // Clamped to 95%: a 0.96 crit roll never crits
        let outcome = resolver.resolve_attack(&input, roll_set(10, 0.96, 0.99));
        assert!(!outcome.is_crit);
        let outcome = resolver.resolve_attack(&input, roll_set(10, 0.5, 0.99));
        assert!(outcome.is_crit);
        assert_eq!(outcome.damage, 14);
    }

    #[test]
    fn test_zero_crit_chance_never_rolls_crit() {
        let resolver = AttackResolver::default();
        let input = level_one();
        // Min clamp would be 5%, but no crit chance means no crit roll at all
        let outcome = resolver.resolve_attack(&input, roll_set(10, 0.0, 0.99));
        assert!(!outcome.is_crit);
    }

    #[test]
    fn test_evasion() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            miss_chance: 0.25,
            ..level_one()
        };
        let evaded = resolver.resolve_attack(&input, roll_set(10, 0.99, 0.1));
        assert_eq!(evaded.result, HitResult::Evaded);
        assert_eq!(evaded.damage, 0);

        let landed = resolver.resolve_attack(&input, roll_set(10, 0.99, 0.3));
        assert!(landed.is_hit());

        // A natural 20 cannot be evaded
        let nat = resolver.resolve_attack(&input, roll_set(20, 0.99, 0.0));
        assert!(nat.is_hit());
    }

    #[test]
    fn test_negative_raw_damage_is_no_damage() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            ability_modifier: -10,
            armor_class: 0,
            ..level_one()
        };
        // 5 + 2 - 10 * 1.1 = -4
        let outcome = resolver.resolve_attack(&input, rolls(15));
        assert_eq!(outcome.result, HitResult::NoDamage);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_fractional_damage_floors_with_minimum_one() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            flat_bonus: -6.5,
            ..level_one()
        };
        // 7 - 6.5 = 0.5 -> 1
        assert_eq!(resolver.resolve_attack(&input, rolls(15)).damage, 1);
    }

    #[test]
    fn test_boss_immune_and_resistant() {
        let resolver = AttackResolver::default();
        let traits = BossTraits {
            vulnerabilities: vec![WeaponType::Ice],
            resistances: vec![WeaponType::Slash],
            immunities: vec![WeaponType::Fire],
        };
        let base = AttackInput {
            flat_bonus: 2.0,
            ..level_one()
        };

        let immune = AttackInput {
            weapon_type: Some(WeaponType::Fire),
            effectiveness: traits.effectiveness(Some(WeaponType::Fire)),
            ..base
        };
        let outcome = resolver.resolve_attack(&immune, rolls(15));
        assert!(outcome.is_hit());
        assert_eq!(outcome.damage, 0);

        // 9 raw -> floor(4.5) = 4
        let resistant = AttackInput {
            weapon_type: Some(WeaponType::Slash),
            effectiveness: traits.effectiveness(Some(WeaponType::Slash)),
            ..base
        };
        assert_eq!(resolver.resolve_attack(&resistant, rolls(15)).damage, 4);

        // 9 raw -> floor(13.5) = 13
        let vulnerable = AttackInput {
            weapon_type: Some(WeaponType::Ice),
            effectiveness: traits.effectiveness(Some(WeaponType::Ice)),
            ..base
        };
        assert_eq!(resolver.resolve_attack(&vulnerable, rolls(15)).damage, 13);
    }

    #[test]
    fn test_damage_formula_scales_modifier_with_level() {
        let resolver = AttackResolver::default();
        let input = AttackInput {
            level: 10,
            ability_modifier: 4,
            skill_damage_bonus: 3.0,
            flat_bonus: 1.0,
            ..level_one()
        };
        // 5 + 20 + 4 * 2.0 + 1 + 3 = 37
        assert!((resolver.raw_damage(&input) - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_rolls_draw_order() {
        let mut dice = crate::core::dice::ScriptedDice::new()
            .with_rolls([17])
            .with_chances([0.1, 0.2]);
        let r = AttackRolls::roll(&mut dice);
        assert_eq!(r.d20, 17);
        assert_eq!(r.crit_roll, 0.1);
        assert_eq!(r.evade_roll, 0.2);
    }
}
