use crate::core::constants::{
    ABILITY_ROLL_MAX, ABILITY_ROLL_MIN, BASE_ABILITY_SCORE, NUM_ABILITIES,
};
use crate::core::dice::Dice;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn all() -> [Ability; NUM_ABILITIES] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Ability::Strength => 0,
            Ability::Dexterity => 1,
            Ability::Constitution => 2,
            Ability::Intelligence => 3,
            Ability::Wisdom => 4,
            Ability::Charisma => 5,
        }
    }
}

/// D&D-style modifier: `floor((score - 10) / 2)`.
///
/// Uses floor division so odd scores below 10 round down (9 -> -1, 7 -> -2).
/// Total over every `i32`.
pub fn ability_modifier(score: i32) -> i32 {
    let delta = score as i64 - BASE_ABILITY_SCORE as i64;
    delta.div_euclid(2) as i32
}

/// The six ability scores. Equipment can push a score outside the creation
/// range, including below zero, so values are signed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilityScores {
    values: [i32; NUM_ABILITIES],
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new()
    }
}

impl AbilityScores {
    /// All scores at the base value of 10.
    pub fn new() -> Self {
        Self {
            values: [BASE_ABILITY_SCORE; NUM_ABILITIES],
        }
    }

    /// All scores at zero; used for bonus deltas.
    pub fn zero() -> Self {
        Self {
            values: [0; NUM_ABILITIES],
        }
    }

    /// Character-creation roll: each score uniformly in 8..=18.
    pub fn roll(dice: &mut impl Dice) -> Self {
        let mut scores = Self::new();
        for ability in Ability::all() {
            scores.set(
                ability,
                dice.range_inclusive(ABILITY_ROLL_MIN, ABILITY_ROLL_MAX),
            );
        }
        scores
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.values[ability.index()]
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        self.values[ability.index()] = value;
    }

    pub fn increment(&mut self, ability: Ability) {
        self.values[ability.index()] = self.values[ability.index()].saturating_add(1);
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }

    /// Adds another set of scores (for equipment deltas).
    pub fn add(&mut self, other: &AbilityScores) {
        for ability in Ability::all() {
            self.values[ability.index()] =
                self.values[ability.index()].saturating_add(other.get(ability));
        }
    }

    pub fn from_values(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            values: [str, dex, con, int, wis, cha],
        }
    }

    /// True when every score sits in the creation range.
    pub fn within_creation_range(&self) -> bool {
        self.values
            .iter()
            .all(|v| (ABILITY_ROLL_MIN..=ABILITY_ROLL_MAX).contains(v))
    }

    /// First score outside the creation range, if any.
    pub fn first_out_of_range(&self) -> Option<i32> {
        self.values
            .iter()
            .copied()
            .find(|v| !(ABILITY_ROLL_MIN..=ABILITY_ROLL_MAX).contains(v))
    }
}
