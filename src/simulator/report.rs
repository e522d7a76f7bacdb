//! Simulation report generation.

use crate::gacha::{Rarity, TierCounts, TierTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from one simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub context: String,
    pub seed: Option<u64>,

    /// Configured weights for the context, as written
    pub configured: BTreeMap<Rarity, f64>,

    pub single_draws: TierCounts,
    pub batch_draws: TierCounts,
    pub best_per_batch: TierCounts,
    pub num_batches: u64,
    pub pity_batches: u64,
}

/// Share of the `[0, 100)` roll range each tier actually claims.
///
/// Upper tiers claim their weight first; N also absorbs any shortfall below
/// 100, and tiers past 100 claim nothing.
pub fn effective_percentages(table: &TierTable) -> BTreeMap<Rarity, f64> {
    let mut shares = BTreeMap::new();
    let mut remaining = 100.0_f64;
    for (rarity, weight) in table.tiers_descending() {
        let share = weight.min(remaining).max(0.0);
        shares.insert(rarity, share);
        remaining -= share;
    }
    if !table.is_empty() {
        *shares.entry(Rarity::LOWEST).or_insert(0.0) += remaining.max(0.0);
    }
    shares
}

impl SimReport {
    fn expected(&self) -> BTreeMap<Rarity, f64> {
        effective_percentages(&TierTable::from_weights(self.configured.clone()))
    }

    /// Largest absolute gap, in percentage points, between observed single
    /// draw shares and the effective configured rates.
    pub fn max_rate_deviation(&self) -> f64 {
        if self.single_draws.total() == 0 {
            return 0.0;
        }
        self.expected()
            .iter()
            .map(|(rarity, expected)| (self.single_draws.percent(*rarity) - expected).abs())
            .fold(0.0, f64::max)
    }

    pub fn pity_rate(&self) -> f64 {
        if self.num_batches == 0 {
            0.0
        } else {
            self.pity_batches as f64 / self.num_batches as f64 * 100.0
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                     GACHA SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Context: {}\n", self.context));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed:    {}\n", seed));
        }
        report.push('\n');

        let expected = self.expected();

        if self.single_draws.total() > 0 {
            report.push_str("── SINGLE DRAWS ─────────────────────────────────────────────────\n");
            report.push_str(&format!("  Draws: {}\n", self.single_draws.total()));
            for rarity in Rarity::ALL.iter().rev() {
                report.push_str(&format!(
                    "  {:<4} {:>9}  {:>7.3}%  (configured {:>6.2}%)\n",
                    rarity.tag(),
                    self.single_draws.get(*rarity),
                    self.single_draws.percent(*rarity),
                    expected.get(rarity).copied().unwrap_or(0.0),
                ));
            }
            report.push_str(&format!(
                "  Max deviation: {:.3} pts\n\n",
                self.max_rate_deviation()
            ));
        }

        if self.num_batches > 0 {
            report.push_str("── TEN-PULLS ────────────────────────────────────────────────────\n");
            report.push_str(&format!("  Batches: {}\n", self.num_batches));
            for rarity in Rarity::ALL.iter().rev() {
                report.push_str(&format!(
                    "  {:<4} {:>9}  {:>7.3}%   best-of-batch {:>7.3}%\n",
                    rarity.tag(),
                    self.batch_draws.get(*rarity),
                    self.batch_draws.percent(*rarity),
                    self.best_per_batch.percent(*rarity),
                ));
            }
            report.push_str(&format!(
                "  Pity fired in {} batches ({:.2}%)\n",
                self.pity_batches,
                self.pity_rate()
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
