use super::config::GachaConfig;
use super::error::ConfigError;
use super::rolls::RollSource;
use super::types::*;
use tracing::debug;

/// Pick a tier for a roll in `[0, 1)`.
///
/// The roll is scaled to `[0, 100)` and tiers are walked from highest rank
/// down, each claiming `weight` points. Anything left unclaimed falls to
/// [`Rarity::LOWEST`], whether or not the table lists it.
pub fn select_tier(table: &TierTable, roll: f64) -> Result<Rarity, ConfigError> {
    if table.is_empty() {
        return Err(ConfigError::EmptyTierTable);
    }
    let point = roll * 100.0;

    let mut acc = 0.0;
    for (rarity, weight) in table.tiers_descending() {
        if point < acc + weight {
            return Ok(rarity);
        }
        acc += weight;
    }

    Ok(Rarity::LOWEST)
}

/// Pick one reward uniformly from a tier's list and return an owned copy.
pub fn pick_reward(pool: &RewardPool, rarity: Rarity, roll: f64) -> Result<Reward, ConfigError> {
    if !pool.contains_tier(rarity) {
        return Err(ConfigError::MissingPoolTier(rarity));
    }
    let rewards = pool.rewards(rarity);
    if rewards.is_empty() {
        return Err(ConfigError::EmptyRewardList(rarity));
    }

    let index = ((roll * rewards.len() as f64) as usize).min(rewards.len() - 1);
    Ok(rewards[index].clone())
}

/// One weighted draw: a tier roll followed by a reward roll.
pub fn single_draw(
    table: &TierTable,
    pool: &RewardPool,
    rolls: &mut impl RollSource,
) -> Result<DrawResult, ConfigError> {
    let rarity = select_tier(table, rolls.roll())?;
    let reward = pick_reward(pool, rarity, rolls.roll())?;
    Ok(DrawResult { rarity, reward })
}

/// Draw from a fixed tier without rolling for it.
pub fn forced_draw(
    pool: &RewardPool,
    rarity: Rarity,
    rolls: &mut impl RollSource,
) -> Result<DrawResult, ConfigError> {
    let reward = pick_reward(pool, rarity, rolls.roll())?;
    Ok(DrawResult { rarity, reward })
}

/// Ten independent draws with no pity adjustment.
pub fn batch_draw(
    table: &TierTable,
    pool: &RewardPool,
    rolls: &mut impl RollSource,
) -> Result<BatchResult, ConfigError> {
    let mut draws = Vec::with_capacity(BATCH_SIZE);
    for _ in 0..BATCH_SIZE {
        draws.push(single_draw(table, pool, rolls)?);
    }
    Ok(BatchResult::from_draws(draws))
}

/// Minimum-outcome guarantee applied once to a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PityRule {
    /// All draws at the lowest tier: redraw the last slot on the advanced table.
    AdvancedRedraw,
    /// Nothing at or above the second-highest tier: force the last slot to it.
    SecondHighestFloor,
    /// No top-tier draw: force the last slot to the top tier. Then, if fewer
    /// than two second-highest draws remain, force the second-to-last slot.
    TopAndSecondFloor,
}

impl PityRule {
    pub fn for_context(context: &str) -> Option<Self> {
        match context {
            NORMAL => Some(PityRule::AdvancedRedraw),
            ADVANCED => Some(PityRule::SecondHighestFloor),
            LEGENDARY => Some(PityRule::TopAndSecondFloor),
            _ => None,
        }
    }
}

const LAST_SLOT: usize = BATCH_SIZE - 1;
const SECOND_LAST_SLOT: usize = BATCH_SIZE - 2;

/// Apply a pity rule to a finished batch.
///
/// Ranks are the fixed tiers ([`Rarity::LOWEST`], [`Rarity::SECOND_HIGHEST`],
/// [`Rarity::TOP`]), regardless of which tiers the context's table lists.
pub fn apply_pity(
    rule: PityRule,
    batch: &mut BatchResult,
    config: &GachaConfig,
    rolls: &mut impl RollSource,
) -> Result<(), ConfigError> {
    match rule {
        PityRule::AdvancedRedraw => {
            if !batch.iter().any(|r| r.rarity > Rarity::LOWEST) {
                let advanced = config.table(ADVANCED)?;
                let redraw = single_draw(advanced, &config.pools, rolls)?;
                batch.replace(LAST_SLOT, redraw);
            }
        }
        PityRule::SecondHighestFloor => {
            if batch.count_at_least(Rarity::SECOND_HIGHEST) == 0 {
                let forced = forced_draw(&config.pools, Rarity::SECOND_HIGHEST, rolls)?;
                batch.replace(LAST_SLOT, forced);
            }
        }
        PityRule::TopAndSecondFloor => {
            // Two separate checks: the second one counts after the first
            // may have overwritten the last slot.
            if batch.count(Rarity::TOP) == 0 {
                let forced = forced_draw(&config.pools, Rarity::TOP, rolls)?;
                batch.replace(LAST_SLOT, forced);
            }
            if batch.count(Rarity::SECOND_HIGHEST) < 2 {
                let forced = forced_draw(&config.pools, Rarity::SECOND_HIGHEST, rolls)?;
                batch.replace(SECOND_LAST_SLOT, forced);
            }
        }
    }
    Ok(())
}

/// Ten draws in `context` followed by that context's pity rule, if any.
///
/// Contexts without a pity rule return the raw draws. `context` must have a
/// table in `config.rates`; use [`batch_draw`] to draw on an ad-hoc table.
pub fn batch_draw_with_pity(
    context: &str,
    config: &GachaConfig,
    rolls: &mut impl RollSource,
) -> Result<BatchResult, ConfigError> {
    let table = config.table(context)?;
    let mut batch = batch_draw(table, &config.pools, rolls)?;

    if let Some(rule) = PityRule::for_context(context) {
        apply_pity(rule, &mut batch, config, rolls)?;
        if batch.pity_triggered() {
            debug!(context, slots = ?batch.pity_slots(), "pity guarantee applied");
        }
    }

    Ok(batch)
}

/// One draw in `context`.
pub fn draw_in_context(
    context: &str,
    config: &GachaConfig,
    rolls: &mut impl RollSource,
) -> Result<DrawResult, ConfigError> {
    single_draw(config.table(context)?, &config.pools, rolls)
}
