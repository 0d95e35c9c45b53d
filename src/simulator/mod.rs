//! Headless balance simulator.
//!
//! Runs many playthroughs of a fresh character through the real
//! [`EncounterController`](crate::combat::EncounterController) to measure:
//! - Time to clear each zone
//! - Hit rate and damage per hit
//! - Gold, building purchases and item drops

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats};
