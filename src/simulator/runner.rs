//! Simulation runner using the real draw engine.

use super::config::SimConfig;
use super::report::SimReport;
use crate::gacha::{batch_draw_with_pity, single_draw, ConfigError, GachaConfig, TierCounts};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, gacha: &GachaConfig) -> Result<SimReport, ConfigError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let table = gacha.table(&config.context)?;

    let mut single_counts = TierCounts::new();
    for _ in 0..config.num_draws {
        let result = single_draw(table, &gacha.pools, &mut rng)?;
        single_counts.record(result.rarity);
    }

    let mut batch_counts = TierCounts::new();
    let mut best_per_batch = TierCounts::new();
    let mut pity_batches = 0u64;
    for batch_idx in 0..config.num_batches {
        let batch = batch_draw_with_pity(&config.context, gacha, &mut rng)?;
        for result in &batch {
            batch_counts.record(result.rarity);
        }
        if let Some(best) = batch.best() {
            best_per_batch.record(best);
        }
        if batch.pity_triggered() {
            pity_batches += 1;
        }

        if config.logs_batches() {
            info!(
                batch = batch_idx + 1,
                of = config.num_batches,
                summary = %TierCounts::from_results(&batch).summary_line(),
                pity = ?batch.pity_slots(),
                "batch drawn"
            );
        }
    }

    let report = SimReport {
        context: config.context.clone(),
        seed: config.seed,
        configured: table.iter().collect(),
        single_draws: single_counts,
        batch_draws: batch_counts,
        best_per_batch,
        num_batches: config.num_batches as u64,
        pity_batches,
    };

    if config.logs_summary() {
        info!(
            context = %config.context,
            draws = config.num_draws,
            batches = config.num_batches,
            pity_rate = %format!("{:.2}%", report.pity_rate()),
            "simulation finished"
        );
    }

    Ok(report)
}
