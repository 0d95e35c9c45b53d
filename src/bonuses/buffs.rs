//! Timed event buffs. Each buff expires on its own; expired buffs are
//! dropped the next time the list is purged.

use crate::effects::{ChannelAccumulator, Effect};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub id: String,
    pub effects: Vec<Effect>,
    pub expires_at: DateTime<Utc>,
}

impl Buff {
    pub fn new(id: impl Into<String>, effects: Vec<Effect>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            effects,
            expires_at,
        }
    }

    /// Buff lasting `seconds` from `now`. The expiry saturates at the
    /// calendar bounds.
    pub fn lasting(
        id: impl Into<String>,
        effects: Vec<Effect>,
        now: DateTime<Utc>,
        seconds: i64,
    ) -> Self {
        let bound = if seconds < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        let expires_at = Duration::try_seconds(seconds)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(bound);
        Self::new(id, effects, expires_at)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuffs {
    buffs: Vec<Buff>,
}

impl ActiveBuffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buff, replacing any buff with the same id.
    pub fn add(&mut self, buff: Buff) {
        self.buffs.retain(|b| b.id != buff.id);
        self.buffs.push(buff);
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    /// Drop expired buffs. Returns how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.buffs.len();
        self.buffs.retain(|b| b.is_active(now));
        let removed = before - self.buffs.len();
        if removed > 0 {
            debug!(removed, "expired buffs purged");
        }
        removed
    }

    /// Additive sums and multiplicative products of every buff active at
    /// `now`. Expired buffs are ignored even before they are purged.
    pub fn modifiers(&self, now: DateTime<Utc>) -> ChannelAccumulator {
        let mut acc = ChannelAccumulator::new();
        for buff in self.buffs.iter().filter(|b| b.is_active(now)) {
            for effect in &buff.effects {
                acc.apply(effect);
            }
        }
        acc
    }
}
