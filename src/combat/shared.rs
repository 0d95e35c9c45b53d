//! Thread-safe handle so a manual-input thread and an auto-attack ticker can
//! drive the same encounter.

use super::encounter::EncounterController;
use super::resolver::AttackOutcome;
use crate::core::dice::{Dice, GameDice};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SharedEncounter<D: Dice = GameDice> {
    inner: Arc<Mutex<EncounterController<D>>>,
}

impl<D: Dice> Clone for SharedEncounter<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Dice> SharedEncounter<D> {
    pub fn new(controller: EncounterController<D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    // Recover the guard if another holder panicked.
    fn lock(&self) -> MutexGuard<'_, EncounterController<D>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn attack(&self) -> Option<AttackOutcome> {
        self.lock().attack()
    }

    pub fn tick(&self, delta_seconds: f64) -> Vec<AttackOutcome> {
        self.lock().tick(delta_seconds)
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut EncounterController<D>) -> R) -> R {
        f(&mut self.lock())
    }
}
