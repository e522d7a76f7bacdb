use super::config::{
    default_pools, default_rates, validate_pools, validate_rates, GachaConfig, Rates,
};
use super::error::ConfigError;
use super::types::{Rarity, RewardPool};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory the server keeps gacha config files in, relative to its root.
pub const DEFAULT_CONFIG_DIR: &str = "kubejs/config";
pub const POOLS_FILE: &str = "gacha_pools.json";
pub const RATES_FILE: &str = "gacha_rates.json";

/// Result of loading a config file: either what was on disk, or the
/// built-in defaults together with why the file was not used.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoad<T> {
    Loaded(T),
    Fallback { config: T, reason: String },
}

impl<T> ConfigLoad<T> {
    pub fn config(&self) -> &T {
        match self {
            ConfigLoad::Loaded(config) => config,
            ConfigLoad::Fallback { config, .. } => config,
        }
    }

    pub fn into_config(self) -> T {
        match self {
            ConfigLoad::Loaded(config) => config,
            ConfigLoad::Fallback { config, .. } => config,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigLoad::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            ConfigLoad::Loaded(_) => None,
            ConfigLoad::Fallback { reason, .. } => Some(reason),
        }
    }
}

pub fn pools_path(dir: &Path) -> PathBuf {
    dir.join(POOLS_FILE)
}

pub fn rates_path(dir: &Path) -> PathBuf {
    dir.join(RATES_FILE)
}

/// Read and validate a reward pools file.
pub fn read_pools(path: &Path) -> Result<RewardPool, ConfigError> {
    let json = fs::read_to_string(path)?;
    let pools: RewardPool = serde_json::from_str(&json)?;
    validate_pools(&pools)?;
    Ok(pools)
}

/// Read and validate a rates file.
pub fn read_rates(path: &Path) -> Result<Rates, ConfigError> {
    let json = fs::read_to_string(path)?;
    let rates: Rates = serde_json::from_str(&json)?;
    validate_rates(&rates)?;
    Ok(rates)
}

pub fn load_pools(path: &Path) -> ConfigLoad<RewardPool> {
    match read_pools(path) {
        Ok(pools) => {
            info!(path = %path.display(), "loaded reward pools");
            ConfigLoad::Loaded(pools)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "reward pools unusable, using defaults");
            ConfigLoad::Fallback {
                config: default_pools(),
                reason: e.to_string(),
            }
        }
    }
}

pub fn load_rates(path: &Path) -> ConfigLoad<Rates> {
    match read_rates(path) {
        Ok(rates) => {
            info!(path = %path.display(), "loaded draw rates");
            ConfigLoad::Loaded(rates)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "draw rates unusable, using defaults");
            ConfigLoad::Fallback {
                config: default_rates(),
                reason: e.to_string(),
            }
        }
    }
}

/// Load pools and rates from `dir`.
///
/// Each file falls back independently, so a broken rates file does not throw
/// away a good pools file. The combined result is a fallback if either part
/// was.
pub fn load_config(dir: &Path) -> ConfigLoad<GachaConfig> {
    let pools = load_pools(&pools_path(dir));
    let rates = load_rates(&rates_path(dir));

    let mut reasons = Vec::new();
    if let Some(reason) = pools.fallback_reason() {
        reasons.push(format!("{POOLS_FILE}: {reason}"));
    }
    if let Some(reason) = rates.fallback_reason() {
        reasons.push(format!("{RATES_FILE}: {reason}"));
    }

    let config = GachaConfig::new(pools.into_config(), rates.into_config());
    for rarity in Rarity::ALL {
        info!(tier = %rarity, rewards = config.pools.rewards(rarity).len(), "reward pool");
    }

    if reasons.is_empty() {
        ConfigLoad::Loaded(config)
    } else {
        ConfigLoad::Fallback {
            config,
            reason: reasons.join("; "),
        }
    }
}

/// Write both config files to `dir`, creating it if needed.
pub fn save_config(dir: &Path, config: &GachaConfig) -> Result<(), ConfigError> {
    fs::create_dir_all(dir)?;
    fs::write(
        pools_path(dir),
        serde_json::to_string_pretty(&config.pools)?,
    )?;
    fs::write(
        rates_path(dir),
        serde_json::to_string_pretty(&config.rates)?,
    )?;
    Ok(())
}
