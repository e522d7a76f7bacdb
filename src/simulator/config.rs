//! Simulation configuration.

use crate::gacha::NORMAL;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Draw context to simulate
    pub context: String,

    /// Number of single draws
    pub num_draws: u32,

    /// Number of ten-pull batches
    pub num_batches: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per batch)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            context: NORMAL.to_string(),
            num_draws: 100_000,
            num_batches: 10_000,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    pub fn logs_summary(&self) -> bool {
        self.verbosity >= 1
    }

    pub fn logs_batches(&self) -> bool {
        self.verbosity >= 2
    }

    /// Single draws only, for checking tier rates
    pub fn rate_check(context: &str, num_draws: u32) -> Self {
        Self {
            context: context.to_string(),
            num_draws,
            num_batches: 0,
            ..Default::default()
        }
    }

    /// Ten-pulls only, for checking pity behavior
    pub fn pity_check(context: &str, num_batches: u32) -> Self {
        Self {
            context: context.to_string(),
            num_draws: 0,
            num_batches,
            ..Default::default()
        }
    }
}
