// Ability scores
pub const BASE_ABILITY_SCORE: i32 = 10;
pub const NUM_ABILITIES: usize = 6;
pub const ABILITY_ROLL_MIN: i32 = 8;
pub const ABILITY_ROLL_MAX: i32 = 18;
pub const ABILITY_POINTS_PER_LEVEL: u32 = 1;

// Attack roll
pub const D20_SIDES: u32 = 20;
pub const NATURAL_CRIT: u32 = 20;
pub const NATURAL_MISS: u32 = 1;
pub const PROFICIENCY_LEVEL_STEP: u32 = 4;

// Damage formula: base + per_level * level + modifier * (1 + level * scale) + flat
pub const BASE_DAMAGE: f64 = 5.0;
pub const DAMAGE_PER_LEVEL: f64 = 2.0;
pub const MODIFIER_SCALE_PER_LEVEL: f64 = 0.1;
pub const CRIT_MULTIPLIER: f64 = 2.0;

// Boss weapon effectiveness
pub const IMMUNE_MULTIPLIER: f64 = 0.0;
pub const RESISTANT_MULTIPLIER: f64 = 0.5;
pub const VULNERABLE_MULTIPLIER: f64 = 1.5;

// Player-facing chance clamp
pub const MIN_CHANCE: f64 = 0.05;
pub const MAX_CHANCE: f64 = 0.95;

// Zone scaling
pub const ZONE_DIFFICULTY_GROWTH: f64 = 2.5;
pub const ZONE_REWARD_GROWTH: f64 = 0.25;
pub const BOSS_HP_MULTIPLIER: f64 = 10.0;
pub const BOSS_REWARD_MULTIPLIER: f64 = 10.0;
pub const BOSS_TIMER_SECONDS: f64 = 30.0;

// Monster affixes
pub const AFFIX_CHANCE: f64 = 0.15;
pub const AFFIX_MIN_ZONE: u32 = 2;

// Auto attacks
pub const BASE_AUTO_ATTACKS_PER_SECOND: f64 = 0.5;
pub const MAX_AUTO_ATTACKS_PER_TICK: u32 = 50;

// Equipment drops
pub const NORMAL_DROP_CHANCE: f64 = 0.08;
pub const BOSS_DROP_CHANCE: f64 = 0.60;
pub const ZONE_ILVL_MULTIPLIER: u32 = 10;
pub const RARITY_BONUS_PER_CLEAR: f64 = 0.02;
pub const RARITY_BONUS_CAP: f64 = 0.20;

// XP curve
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// Prestige
pub const PRESTIGE_BASE_LEVEL: u32 = 10;
pub const PRESTIGE_LEVEL_STEP: u32 = 5;

// Meta upgrades: (per_level_rate, base_cost, cost_multiplier)
pub const META_GLOBAL_DAMAGE: (f64, f64, f64) = (0.10, 1.0, 1.5);
pub const META_AUTO_SPEED: (f64, f64, f64) = (0.05, 2.0, 1.6);
pub const META_QUEST_EFFICIENCY: (f64, f64, f64) = (0.05, 1.0, 1.4);
pub const META_OFFLINE_RATE: (f64, f64, f64) = (0.10, 3.0, 1.8);

// Compendium mastery
pub const COMPENDIUM_DISCOVERY_STEP_PERCENT: f64 = 10.0;
pub const COMPENDIUM_GOLD_PER_STEP: f64 = 2.0;
pub const COMPENDIUM_XP_PER_STEP: f64 = 1.0;
pub const COMPENDIUM_KILL_MILESTONES: [u64; 4] = [100, 1_000, 10_000, 100_000];
pub const COMPENDIUM_DAMAGE_PER_MILESTONE: f64 = 1.0;
pub const COMPENDIUM_CRIT_PER_MILESTONE: f64 = 0.5;
