//! Per-player zone progress.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneProgress {
    pub clear_count: u32,
    pub is_unlocked: bool,
}

impl Default for ZoneProgress {
    fn default() -> Self {
        Self {
            clear_count: 1,
            is_unlocked: false,
        }
    }
}

/// Tracks the active zone and each zone's clear count and unlock state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneProgression {
    pub current_zone_id: u32,
    zones: BTreeMap<u32, ZoneProgress>,
}

impl Default for ZoneProgression {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneProgression {
    /// Starts in zone 1 with only zone 1 unlocked.
    pub fn new() -> Self {
        let mut zones = BTreeMap::new();
        zones.insert(
            1,
            ZoneProgress {
                clear_count: 1,
                is_unlocked: true,
            },
        );
        Self {
            current_zone_id: 1,
            zones,
        }
    }

    pub fn progress(&self, zone_id: u32) -> ZoneProgress {
        self.zones.get(&zone_id).copied().unwrap_or_default()
    }

    pub fn clear_count(&self, zone_id: u32) -> u32 {
        self.progress(zone_id).clear_count.max(1)
    }

    pub fn is_zone_unlocked(&self, zone_id: u32) -> bool {
        self.progress(zone_id).is_unlocked
    }

    pub fn unlock_zone(&mut self, zone_id: u32) {
        let entry = self.zones.entry(zone_id).or_default();
        if !entry.is_unlocked {
            entry.is_unlocked = true;
            info!(zone_id, "zone unlocked");
        }
    }

    /// Record a boss kill: the zone's clear count goes up by exactly one.
    /// Returns the new clear count.
    pub fn record_boss_kill(&mut self, zone_id: u32) -> u32 {
        let entry = self.zones.entry(zone_id).or_default();
        entry.clear_count = entry.clear_count.max(1) + 1;
        entry.clear_count
    }

    /// Move to an unlocked zone. Returns false when the zone is locked.
    pub fn enter_zone(&mut self, zone_id: u32) -> bool {
        if !self.is_zone_unlocked(zone_id) {
            return false;
        }
        self.current_zone_id = zone_id;
        true
    }

    /// `sum(clear_count - 1)` over every zone.
    pub fn extra_clears(&self) -> u64 {
        self.zones
            .values()
            .map(|p| p.clear_count.saturating_sub(1) as u64)
            .sum()
    }

    pub fn unlocked_zones(&self) -> Vec<u32> {
        self.zones
            .iter()
            .filter(|(_, p)| p.is_unlocked)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Prestige reset: clear counts back to 1, only zone 1 unlocked and active.
    pub fn reset_for_prestige(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progression() {
        let prog = ZoneProgression::new();
        assert_eq!(prog.current_zone_id, 1);
        assert!(prog.is_zone_unlocked(1));
        assert!(!prog.is_zone_unlocked(2));
        assert_eq!(prog.clear_count(1), 1);
        assert_eq!(prog.clear_count(7), 1);
    }

    #[test]
    fn test_boss_kill_increments_by_one() {
        let mut prog = ZoneProgression::new();
        assert_eq!(prog.record_boss_kill(1), 2);
        assert_eq!(prog.record_boss_kill(1), 3);
        assert_eq!(prog.clear_count(2), 1);
        assert_eq!(prog.extra_clears(), 2);
    }

    #[test]
    fn test_enter_locked_zone_fails() {
        let mut prog = ZoneProgression::new();
        assert!(!prog.enter_zone(2));
        assert_eq!(prog.current_zone_id, 1);
        prog.unlock_zone(2);
        assert!(prog.enter_zone(2));
        assert_eq!(prog.current_zone_id, 2);
    }

    #[test]
    fn test_unlock_zone_idempotent() {
        let mut prog = ZoneProgression::new();
        prog.unlock_zone(2);
        prog.unlock_zone(2);
        assert_eq!(prog.unlocked_zones(), vec![1, 2]);
    }

    #[test]
    fn test_reset_for_prestige() {
        let mut prog = ZoneProgression::new();
        prog.unlock_zone(2);
        prog.unlock_zone(3);
        prog.record_boss_kill(1);
        prog.record_boss_kill(2);
        prog.enter_zone(3);

        prog.reset_for_prestige();

        assert_eq!(prog.current_zone_id, 1);
        assert_eq!(prog.unlocked_zones(), vec![1]);
        assert_eq!(prog.clear_count(1), 1);
        assert_eq!(prog.clear_count(2), 1);
        assert_eq!(prog.extra_clears(), 0);
    }
}
