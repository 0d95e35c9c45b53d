//! Ranked combat skills feeding the attack roll and damage formula.

use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillId {
    /// +1 damage per rank
    PowerStrike,
    /// +1 attack per two ranks
    KeenEye,
    /// +1 attack per rank
    Precision,
    /// +2 damage per rank
    Brutality,
}

impl SkillId {
    pub const ALL: [SkillId; 4] = [
        SkillId::PowerStrike,
        SkillId::KeenEye,
        SkillId::Precision,
        SkillId::Brutality,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::PowerStrike => "Power Strike",
            SkillId::KeenEye => "Keen Eye",
            SkillId::Precision => "Precision",
            SkillId::Brutality => "Brutality",
        }
    }

    pub fn max_rank(&self) -> u32 {
        match self {
            SkillId::PowerStrike | SkillId::KeenEye => 5,
            SkillId::Precision | SkillId::Brutality => 3,
        }
    }

    fn attack_at(&self, rank: u32) -> i32 {
        match self {
            SkillId::KeenEye => (rank / 2) as i32,
            SkillId::Precision => rank as i32,
            _ => 0,
        }
    }

    fn damage_at(&self, rank: u32) -> f64 {
        match self {
            SkillId::PowerStrike => rank as f64,
            SkillId::Brutality => 2.0 * rank as f64,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillBook {
    ranks: HashMap<SkillId, u32>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rank(&self, skill: SkillId) -> u32 {
        self.ranks.get(&skill).copied().unwrap_or(0)
    }

    /// Raise a skill by one rank. Returns the new rank.
    pub fn train(&mut self, skill: SkillId) -> Result<u32> {
        let rank = self.rank(skill);
        if rank >= skill.max_rank() {
            return Err(EngineError::MaxLevel {
                what: skill.name().to_string(),
                max_level: skill.max_rank(),
            });
        }
        self.ranks.insert(skill, rank + 1);
        Ok(rank + 1)
    }

    /// Total attack roll bonus across all skills.
    pub fn attack_bonus(&self) -> i32 {
        SkillId::ALL
            .iter()
            .map(|s| s.attack_at(self.rank(*s)))
            .sum()
    }

    /// Total flat damage bonus across all skills.
    pub fn damage_bonus(&self) -> f64 {
        SkillId::ALL
            .iter()
            .map(|s| s.damage_at(self.rank(*s)))
            .sum()
    }

    pub fn reset(&mut self) {
        self.ranks.clear();
    }
}
