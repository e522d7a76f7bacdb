use super::error::ConfigError;
use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tier tables keyed by draw context name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rates {
    contexts: BTreeMap<String, TierTable>,
}

impl Rates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: impl Into<String>, table: TierTable) -> Self {
        self.contexts.insert(context.into(), table);
        self
    }

    pub fn get(&self, context: &str) -> Option<&TierTable> {
        self.contexts.get(context)
    }

    pub fn contains(&self, context: &str) -> bool {
        self.contexts.contains_key(context)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TierTable)> + '_ {
        self.contexts.iter().map(|(name, table)| (name.as_str(), table))
    }
}

/// Fully resolved draw configuration: one shared pool plus per-context rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GachaConfig {
    pub pools: RewardPool,
    pub rates: Rates,
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self {
            pools: default_pools(),
            rates: default_rates(),
        }
    }
}

impl GachaConfig {
    pub fn new(pools: RewardPool, rates: Rates) -> Self {
        Self { pools, rates }
    }

    /// Tier table for a context.
    pub fn table(&self, context: &str) -> Result<&TierTable, ConfigError> {
        self.rates
            .get(context)
            .ok_or_else(|| ConfigError::UnknownContext(context.to_string()))
    }

    /// Check pools, rates, and that every tier a table names has rewards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pools(&self.pools)?;
        validate_rates(&self.rates)?;
        for (_, table) in self.rates.iter() {
            for (rarity, _) in table.iter() {
                if !self.pools.contains_tier(rarity) {
                    return Err(ConfigError::MissingPoolTier(rarity));
                }
                if self.pools.rewards(rarity).is_empty() {
                    return Err(ConfigError::EmptyRewardList(rarity));
                }
            }
        }
        Ok(())
    }
}

/// Every tier present with at least one reward, and no zero quantities.
pub fn validate_pools(pools: &RewardPool) -> Result<(), ConfigError> {
    for rarity in Rarity::ALL {
        if !pools.contains_tier(rarity) {
            return Err(ConfigError::MissingPoolTier(rarity));
        }
        if pools.rewards(rarity).is_empty() {
            return Err(ConfigError::EmptyRewardList(rarity));
        }
    }
    for (_, rewards) in pools.iter() {
        if let Some(reward) = rewards.iter().find(|r| r.count == 0) {
            return Err(ConfigError::ZeroQuantity {
                item: reward.item.clone(),
            });
        }
    }
    Ok(())
}

/// Required contexts present, tables non-empty, weights non-negative.
///
/// Weight sums are not checked; a shortfall below 100 goes to N.
pub fn validate_rates(rates: &Rates) -> Result<(), ConfigError> {
    for context in REQUIRED_CONTEXTS {
        if !rates.contains(context) {
            return Err(ConfigError::MissingContext(context.to_string()));
        }
    }
    for (context, table) in rates.iter() {
        if table.is_empty() {
            return Err(ConfigError::EmptyTierTable);
        }
        for (rarity, weight) in table.iter() {
            if weight < 0.0 || weight.is_nan() {
                return Err(ConfigError::NegativeWeight {
                    context: context.to_string(),
                    rarity,
                    weight,
                });
            }
        }
    }
    Ok(())
}

pub fn default_pools() -> RewardPool {
    RewardPool::new()
        .with_tier(
            Rarity::N,
            vec![
                Reward::new("minecraft:iron_ingot", 16, "Iron Ingot x16"),
                Reward::new("minecraft:gold_ingot", 8, "Gold Ingot x8"),
                Reward::new("minecraft:coal", 32, "Coal x32"),
            ],
        )
        .with_tier(
            Rarity::R,
            vec![
                Reward::new("minecraft:diamond", 3, "Diamond x3"),
                Reward::new("minecraft:emerald", 5, "Emerald x5"),
            ],
        )
        .with_tier(
            Rarity::SR,
            vec![
                Reward::new("minecraft:diamond", 16, "Diamond x16"),
                Reward::new("minecraft:nether_star", 1, "Nether Star"),
            ],
        )
        .with_tier(
            Rarity::SSR,
            vec![
                Reward::new("minecraft:netherite_ingot", 8, "Netherite Ingot x8"),
                Reward::new(
                    "minecraft:enchanted_golden_apple",
                    16,
                    "Enchanted Golden Apple x16",
                ),
            ],
        )
}

pub fn default_rates() -> Rates {
    Rates::new()
        .with_context(
            NORMAL,
            TierTable::from_weights([
                (Rarity::N, 70.0),
                (Rarity::R, 25.0),
                (Rarity::SR, 4.5),
                (Rarity::SSR, 0.5),
            ]),
        )
        .with_context(
            ADVANCED,
            TierTable::from_weights([
                (Rarity::N, 40.0),
                (Rarity::R, 45.0),
                (Rarity::SR, 13.0),
                (Rarity::SSR, 2.0),
            ]),
        )
        .with_context(
            LEGENDARY,
            TierTable::from_weights([
                (Rarity::N, 0.0),
                (Rarity::R, 50.0),
                (Rarity::SR, 40.0),
                (Rarity::SSR, 10.0),
            ]),
        )
}
