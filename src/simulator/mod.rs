//! Draw-rate simulator for Monte Carlo checks of a gacha configuration.
//!
//! Runs many single draws and ten-pulls against real configuration and
//! reports observed tier frequencies next to the configured rates:
//! - Tier shares for single draws
//! - Tier shares and best-tier distribution for ten-pulls
//! - How often each pity rule fires

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{effective_percentages, SimReport};
pub use runner::run_simulation;
