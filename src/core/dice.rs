//! Random source used by every roll in the engine.
//!
//! Combat, affix and drop rolls all go through [`Dice`] so that a scenario can
//! be replayed from a seed ([`GameDice`]) or from a fixed script
//! ([`ScriptedDice`]).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub trait Dice {
    /// Roll a die with `sides` faces (1..=sides).
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Uniform value in [0, 1).
    fn chance(&mut self) -> f64;

    /// Uniform index in 0..len. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform integer in min..=max.
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32;

    fn d20(&mut self) -> u32 {
        self.roll_die(crate::core::constants::D20_SIDES)
    }

    /// Bernoulli trial: true with probability `p`.
    fn succeeds(&mut self, p: f64) -> bool {
        self.chance() < p
    }
}

/// Adapts any `rand` generator to [`Dice`].
#[derive(Debug, Clone)]
pub struct RngDice<R: Rng>(pub R);

impl<R: Rng> Dice for RngDice<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.0.gen_range(1..=sides.max(1))
    }

    fn chance(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len.max(1))
    }

    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}

/// Seedable dice used by the game and the simulator.
pub type GameDice = RngDice<ChaCha8Rng>;

impl GameDice {
    pub fn seeded(seed: u64) -> Self {
        RngDice(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngDice(ChaCha8Rng::from_entropy())
    }
}

/// Replays queued rolls, then falls back to fixed values.
///
/// The default fallback chance (0.99) sits above the chance clamp, so once the
/// queue is empty no clamped proc (affix, drop, crit chance, evade) fires.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<f64>,
    pub fallback_roll: u32,
    pub fallback_chance: f64,
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self {
            rolls: VecDeque::new(),
            chances: VecDeque::new(),
            fallback_roll: 10,
            fallback_chance: 0.99,
        }
    }

    /// Dice that always rolls `roll` on every die.
    pub fn always(roll: u32) -> Self {
        Self {
            fallback_roll: roll,
            ..Self::new()
        }
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn push_roll(&mut self, roll: u32) {
        self.rolls.push_back(roll);
    }

    pub fn push_chance(&mut self, chance: f64) {
        self.chances.push_back(chance);
    }
}

impl Dice for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rolls
            .pop_front()
            .unwrap_or(self.fallback_roll)
            .clamp(1, sides.max(1))
    }

    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(self.fallback_chance)
    }

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }

    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let roll = self.rolls.pop_front().unwrap_or(self.fallback_roll) as i32;
        roll.clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_dice_are_reproducible() {
        let mut a = GameDice::seeded(42);
        let mut b = GameDice::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.d20(), b.d20());
            assert_eq!(a.chance(), b.chance());
        }
    }

    #[test]
    fn test_d20_range() {
        let mut dice = GameDice::seeded(7);
        let mut seen = [false; 21];
        for _ in 0..2000 {
            let roll = dice.d20();
            assert!((1..=20).contains(&roll));
            seen[roll as usize] = true;
        }
        assert!(seen[1..].iter().all(|s| *s), "every face should come up");
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let mut dice = GameDice::seeded(3);
        for _ in 0..500 {
            let v = dice.range_inclusive(8, 18);
            assert!((8..=18).contains(&v));
        }
        assert_eq!(dice.range_inclusive(5, 5), 5);
    }

    #[test]
    fn test_scripted_dice_replays_then_falls_back() {
        let mut dice = ScriptedDice::new()
            .with_rolls([20, 1])
            .with_chances([0.0]);
        assert_eq!(dice.d20(), 20);
        assert_eq!(dice.d20(), 1);
        assert_eq!(dice.d20(), 10);
        assert_eq!(dice.chance(), 0.0);
        assert_eq!(dice.chance(), 0.99);
    }

    #[test]
    fn test_scripted_rolls_clamped_to_die() {
        let mut dice = ScriptedDice::always(30);
        assert_eq!(dice.d20(), 20);
        assert_eq!(dice.roll_die(6), 6);
    }
}
