//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum ticks per run before timeout
    pub max_ticks_per_run: u64,

    /// Simulated seconds per tick
    pub tick_seconds: f64,

    /// Manual attacks per tick
    pub clicks_per_tick: u32,

    /// Run ends once this zone's boss falls
    pub target_zone: u32,

    /// Spend gold on buildings as soon as one is affordable
    pub buy_buildings: bool,

    /// Console output (0 = report only, 1 = configuration summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_ticks_per_run: 20_000,
            tick_seconds: 1.0,
            clicks_per_tick: 3,
            target_zone: 3,
            buy_buildings: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a single zone
    pub fn zone_balance_test(target_zone: u32) -> Self {
        Self {
            num_runs: 50,
            target_zone,
            ..Default::default()
        }
    }

    /// Idle-only config: no clicks, progress comes from auto-attacks
    pub fn idle_only(target_zone: u32) -> Self {
        Self {
            clicks_per_tick: 0,
            target_zone,
            ..Default::default()
        }
    }
}
