//! Simulation report generation.

use super::runner::RunStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_zone: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub avg_final_level: f64,
    pub avg_final_zone: f64,
    pub avg_kills: f64,
    pub avg_boss_kills: f64,
    pub avg_boss_timeouts: f64,
    pub avg_seconds_to_clear: f64,

    // Combat
    pub hit_rate: f64,
    pub avg_damage_per_hit: f64,

    // Economy and loot
    pub avg_gold_earned: f64,
    pub avg_items_dropped: f64,
    pub avg_items_equipped: f64,
    pub avg_buildings_bought: f64,

    // Distribution data
    pub zone_distribution: BTreeMap<u32, u32>,
    pub avg_seconds_per_zone: BTreeMap<u32, f64>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_zone: u32, max_ticks: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.ticks >= max_ticks)
            .count() as u32;

        let completed: Vec<RunStats> = runs.iter().filter(|r| r.reached_target).cloned().collect();
        let avg_seconds_to_clear = average(&completed, |r| r.seconds);

        let attacks: u64 = runs.iter().map(|r| r.attacks).sum();
        let hits: u64 = runs.iter().map(|r| r.hits).sum();
        let damage: u64 = runs.iter().map(|r| r.total_damage).sum();
        let hit_rate = if attacks > 0 {
            hits as f64 / attacks as f64
        } else {
            0.0
        };
        let avg_damage_per_hit = if hits > 0 {
            damage as f64 / hits as f64
        } else {
            0.0
        };

        let mut zone_distribution = BTreeMap::new();
        for run in &runs {
            *zone_distribution.entry(run.final_zone).or_insert(0) += 1;
        }

        let mut avg_seconds_per_zone: BTreeMap<u32, f64> = BTreeMap::new();
        for run in &runs {
            for (zone, seconds) in &run.zone_seconds {
                *avg_seconds_per_zone.entry(*zone).or_insert(0.0) += seconds;
            }
        }
        for total in avg_seconds_per_zone.values_mut() {
            *total /= num_runs.max(1) as f64;
        }

        Self {
            num_runs,
            target_zone,
            runs_completed,
            runs_timed_out,
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_final_zone: average(&runs, |r| r.final_zone as f64),
            avg_kills: average(&runs, |r| r.kills as f64),
            avg_boss_kills: average(&runs, |r| r.boss_kills as f64),
            avg_boss_timeouts: average(&runs, |r| r.boss_timeouts as f64),
            avg_seconds_to_clear,
            hit_rate,
            avg_damage_per_hit,
            avg_gold_earned: average(&runs, |r| r.gold_earned as f64),
            avg_items_dropped: average(&runs, |r| r.items_dropped as f64),
            avg_items_equipped: average(&runs, |r| r.items_equipped as f64),
            avg_buildings_bought: average(&runs, |r| r.buildings_bought as f64),
            zone_distribution,
            avg_seconds_per_zone,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared zone {}, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.target_zone, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Final Zone:      {:.1}\n", self.avg_final_zone));
        report.push_str(&format!("  Avg Kills:           {:.0}\n", self.avg_kills));
        report.push_str(&format!("  Avg Boss Kills:      {:.1}\n", self.avg_boss_kills));
        report.push_str(&format!("  Avg Boss Timeouts:   {:.1}\n", self.avg_boss_timeouts));
        report.push_str(&format!(
            "  Avg Time to Clear:   {:.0}s\n\n",
            self.avg_seconds_to_clear
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Hit Rate:            {:.1}%\n", self.hit_rate * 100.0));
        report.push_str(&format!("  Avg Damage per Hit:  {:.1}\n\n", self.avg_damage_per_hit));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Gold Earned:     {:.0}\n", self.avg_gold_earned));
        report.push_str(&format!("  Avg Buildings:       {:.1}\n", self.avg_buildings_bought));
        report.push_str(&format!("  Avg Items Dropped:   {:.1}\n", self.avg_items_dropped));
        report.push_str(&format!("  Avg Items Equipped:  {:.1}\n\n", self.avg_items_equipped));

        report.push_str("── TIME PER ZONE ────────────────────────────────────────────────\n");
        for (zone, seconds) in &self.avg_seconds_per_zone {
            let reached = self.zone_distribution.get(zone).copied().unwrap_or(0);
            let pct = reached as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Zone {:2}: {:>8.0}s  ended here {:>5.1}% {}\n",
                zone, seconds, pct, bar
            ));
        }

        report
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
