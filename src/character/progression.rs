//! Character sheet: level, XP, ability scores and skills.

use super::attributes::{Ability, AbilityScores};
use super::skills::SkillBook;
use crate::core::constants::{
    ABILITY_POINTS_PER_LEVEL, ABILITY_ROLL_MAX, ABILITY_ROLL_MIN, XP_CURVE_BASE,
    XP_CURVE_EXPONENT,
};
use crate::core::dice::Dice;
use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// XP required to go from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level.max(1) as f64, XP_CURVE_EXPONENT)) as u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub abilities: AbilityScores,
    pub unspent_points: u32,
    #[serde(default)]
    pub skills: SkillBook,
}

impl Character {
    /// Level 1 character with all scores at 10.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            xp: 0,
            abilities: AbilityScores::new(),
            unspent_points: 0,
            skills: SkillBook::new(),
        }
    }

    /// Level 1 character with rolled ability scores.
    pub fn rolled(name: impl Into<String>, dice: &mut impl Dice) -> Self {
        Self {
            abilities: AbilityScores::roll(dice),
            ..Self::new(name)
        }
    }

    /// Grant XP and apply any level-ups. Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);

        let mut levelups = 0;
        loop {
            let needed = xp_for_next_level(self.level);
            if self.xp < needed {
                break;
            }
            self.xp -= needed;
            self.level += 1;
            self.unspent_points += ABILITY_POINTS_PER_LEVEL;
            levelups += 1;
        }

        if levelups > 0 {
            info!(
                character = %self.name,
                level = self.level,
                gained = levelups,
                "level up"
            );
        }
        levelups
    }

    /// Spend one unspent point on an ability.
    pub fn allocate_point(&mut self, ability: Ability) -> Result<()> {
        if self.unspent_points == 0 {
            return Err(EngineError::NoAbilityPoints);
        }
        self.unspent_points -= 1;
        self.abilities.increment(ability);
        Ok(())
    }

    /// Replace ability scores wholesale. Every score must be in the creation
    /// range; points spent since creation are refunded.
    pub fn respec(&mut self, scores: AbilityScores) -> Result<()> {
        if let Some(score) = scores.first_out_of_range() {
            return Err(EngineError::InvalidAbilityScore {
                score,
                min: ABILITY_ROLL_MIN,
                max: ABILITY_ROLL_MAX,
            });
        }
        self.abilities = scores;
        self.unspent_points = (self.level - 1) * ABILITY_POINTS_PER_LEVEL;
        Ok(())
    }

    /// Back to level 1 with no XP. Abilities and skills are kept.
    pub fn reset_level(&mut self) {
        self.level = 1;
        self.xp = 0;
        self.unspent_points = 0;
    }
}
