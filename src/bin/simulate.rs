//! Gacha rate simulator CLI.
//!
//! Run Monte Carlo draws against a gacha configuration and compare observed
//! tier rates with the configured ones.
//!
//! Examples:
//!   cargo run --bin simulate                                  # 100k normal draws, 10k ten-pulls
//!   cargo run --bin simulate -- -c legendary -b 5000 -d 0     # Pity behavior only
//!   cargo run --bin simulate -- --config-dir kubejs/config    # Use server config files
//!   cargo run --bin simulate -- --seed 42 --json              # Reproducible, save JSON

use anyhow::{Context, Result};
use clap::Parser;
use server_gacha::gacha::{load_config, GachaConfig};
use server_gacha::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Simulate gacha draws and report tier rates")]
struct Args {
    /// Draw context to simulate
    #[arg(short, long, default_value = "normal")]
    context: String,

    /// Number of single draws
    #[arg(short = 'd', long, default_value_t = 100_000)]
    draws: u32,

    /// Number of ten-pull batches
    #[arg(short = 'b', long, default_value_t = 10_000)]
    batches: u32,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory holding gacha_pools.json and gacha_rates.json (defaults are
    /// used when omitted)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Log every batch and every pity activation
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print the report, no log lines
    #[arg(short, long)]
    quiet: bool,

    /// Save a JSON report next to the current directory
    #[arg(long)]
    json: bool,
}

impl Args {
    fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else if self.verbose {
            2
        } else {
            1
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    fn default_filter(&self) -> &'static str {
        match self.verbosity() {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.default_filter().into()),
        )
        .with_target(false)
        .init();

    let gacha = match &args.config_dir {
        Some(dir) => {
            let load = load_config(dir);
            if let Some(reason) = load.fallback_reason() {
                warn!(%reason, "simulating with default values for part of the config");
            }
            load.into_config()
        }
        None => GachaConfig::default(),
    };

    let config = SimConfig {
        context: args.context.clone(),
        num_draws: args.draws,
        num_batches: args.batches,
        seed: args.seed,
        verbosity: args.verbosity(),
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                   GACHA RATE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Context:        {}", config.context);
    println!("  Single draws:   {}", config.num_draws);
    println!("  Ten-pulls:      {}", config.num_batches);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let report = run_simulation(&config, &gacha)
        .with_context(|| format!("simulation failed for context '{}'", config.context))?;

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "gacha_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}
