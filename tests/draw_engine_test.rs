//! Draw engine tests: tier selection, rate accuracy, and ten-pull pity rules.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use server_gacha::gacha::{
    batch_draw, batch_draw_with_pity, default_pools, default_rates, select_tier, single_draw,
    ConfigError, FixedRolls, GachaConfig, Rarity, Rates, Reward, RewardPool, TierTable, ADVANCED,
    BATCH_SIZE, LEGENDARY, NORMAL,
};

fn weights(n: f64, r: f64, sr: f64, ssr: f64) -> TierTable {
    TierTable::from_weights([
        (Rarity::N, n),
        (Rarity::R, r),
        (Rarity::SR, sr),
        (Rarity::SSR, ssr),
    ])
}

// =========================================================================
// Single draws
// =========================================================================

#[test]
fn test_single_draw_reward_comes_from_selected_tier() {
    let config = GachaConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for (context, table) in config.rates.iter() {
        for _ in 0..2_000 {
            let result = single_draw(table, &config.pools, &mut rng).unwrap();
            let tier_rewards = config.pools.rewards(result.rarity);
            assert!(!tier_rewards.is_empty());
            assert!(
                tier_rewards.contains(&result.reward),
                "{context}: {:?} not in {} pool",
                result.reward,
                result.rarity
            );
        }
    }
}

#[test]
fn test_single_draw_rates_match_weights() {
    let table = weights(70.0, 25.0, 4.5, 0.5);
    let pools = default_pools();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 100_000;

    let mut counts = [0u32; 4];
    for _ in 0..trials {
        let result = single_draw(&table, &pools, &mut rng).unwrap();
        counts[result.rarity as usize] += 1;
    }

    for rarity in Rarity::ALL {
        let observed = counts[rarity as usize] as f64 / trials as f64 * 100.0;
        let expected = table.weight(rarity);
        assert!(
            (observed - expected).abs() < 1.0,
            "{rarity}: observed {observed:.3}%, configured {expected}%"
        );
    }
}

#[test]
fn test_same_roll_same_tier() {
    let table = weights(40.0, 45.0, 13.0, 2.0);
    for step in 0..200 {
        let roll = step as f64 / 200.0;
        let first = select_tier(&table, roll).unwrap();
        for _ in 0..3 {
            assert_eq!(select_tier(&table, roll).unwrap(), first);
        }
    }
}

#[test]
fn test_zero_roll_selects_highest_weighted_tier() {
    assert_eq!(select_tier(&weights(70.0, 25.0, 4.5, 0.5), 0.0).unwrap(), Rarity::SSR);
    // A zero-weight top tier is skipped even at the very bottom of the range
    assert_eq!(select_tier(&weights(70.0, 25.0, 5.0, 0.0), 0.0).unwrap(), Rarity::SR);
}

#[test]
fn test_roll_near_one_selects_lowest_tier() {
    let table = weights(70.0, 25.0, 4.5, 0.5);
    assert_eq!(select_tier(&table, 1.0 - f64::EPSILON).unwrap(), Rarity::N);

    // Lowest tier wins the top of the range even with zero weight when the
    // table falls short of 100
    let short = weights(0.0, 30.0, 10.0, 1.0);
    assert_eq!(select_tier(&short, 0.99).unwrap(), Rarity::N);
}

#[test]
fn test_single_draw_empty_table_errors() {
    let mut rolls = FixedRolls::constant(0.5);
    let err = single_draw(&TierTable::new(), &default_pools(), &mut rolls).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyTierTable));
}

#[test]
fn test_single_draw_empty_reward_list_errors() {
    let pools = default_pools().with_tier(Rarity::N, Vec::new());
    let mut rolls = FixedRolls::constant(0.99);
    let err = single_draw(&weights(70.0, 25.0, 4.5, 0.5), &pools, &mut rolls).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRewardList(Rarity::N)));
}

// =========================================================================
// Ten-pulls
// =========================================================================

#[test]
fn test_batches_always_have_ten_results() {
    let config = GachaConfig {
        rates: default_rates().with_context("festival", weights(10.0, 10.0, 10.0, 70.0)),
        ..GachaConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    for context in [NORMAL, ADVANCED, LEGENDARY, "festival"] {
        for _ in 0..200 {
            let batch = batch_draw_with_pity(context, &config, &mut rng).unwrap();
            assert_eq!(batch.len(), BATCH_SIZE, "{context}");
        }
    }
}

#[test]
fn test_batch_unknown_context_errors() {
    let mut rolls = FixedRolls::constant(0.5);
    let err = batch_draw_with_pity("festival", &GachaConfig::default(), &mut rolls).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownContext(_)));
}

#[test]
fn test_context_without_pity_rule_keeps_raw_draws() {
    let config = GachaConfig {
        rates: default_rates().with_context("festival", weights(70.0, 25.0, 4.5, 0.5)),
        ..GachaConfig::default()
    };
    let mut rolls = FixedRolls::constant(0.99);
    let batch = batch_draw_with_pity("festival", &config, &mut rolls).unwrap();
    assert_eq!(batch.count(Rarity::N), BATCH_SIZE);
    assert!(!batch.pity_triggered());
}

#[test]
fn test_normal_pity_redraws_last_slot_on_advanced_table() {
    let rates = Rates::new()
        .with_context(NORMAL, weights(70.0, 25.0, 4.5, 0.5))
        .with_context(ADVANCED, weights(0.0, 60.0, 30.0, 10.0))
        .with_context(LEGENDARY, weights(0.0, 50.0, 40.0, 10.0));
    let config = GachaConfig::new(default_pools(), rates);

    // 0.99 lands in N on the normal table and in R on the advanced one
    let mut rolls = FixedRolls::constant(0.99);
    let batch = batch_draw_with_pity(NORMAL, &config, &mut rolls).unwrap();

    for i in 0..9 {
        assert_eq!(batch[i].rarity, Rarity::N, "slot {i}");
    }
    assert_eq!(batch[9].rarity, Rarity::R);
    assert_eq!(batch.pity_slots(), &[9]);
}

#[test]
fn test_normal_pity_uses_advanced_roll_even_if_it_lands_low() {
    let config = GachaConfig::default();
    let mut rolls = FixedRolls::constant(0.99);
    let batch = batch_draw_with_pity(NORMAL, &config, &mut rolls).unwrap();

    // Default advanced table also gives N at 0.99; the slot was still redrawn
    assert_eq!(batch.count(Rarity::N), BATCH_SIZE);
    assert_eq!(batch.pity_slots(), &[9]);
}

#[test]
fn test_normal_pity_skipped_when_any_draw_above_lowest() {
    let config = GachaConfig::default();
    // First draw R (roll 0.1 -> [5, 30)), the rest N
    let mut script = vec![0.1, 0.0];
    script.extend(std::iter::repeat(0.99).take(18));
    let mut rolls = FixedRolls::new(script);
    let batch = batch_draw_with_pity(NORMAL, &config, &mut rolls).unwrap();

    assert_eq!(batch[0].rarity, Rarity::R);
    assert!(!batch.pity_triggered());
    assert_eq!(rolls.consumed(), 2 * BATCH_SIZE);
}

#[test]
fn test_advanced_pity_forces_sr_into_last_slot() {
    let config = GachaConfig::default();
    // 0.5 -> R on the advanced table
    let mut rolls = FixedRolls::constant(0.5);
    let batch = batch_draw_with_pity(ADVANCED, &config, &mut rolls).unwrap();

    assert_eq!(batch.count(Rarity::R), 9);
    assert_eq!(batch[9].rarity, Rarity::SR);
    assert!(config.pools.rewards(Rarity::SR).contains(&batch[9].reward));
    assert_eq!(batch.pity_slots(), &[9]);
}

#[test]
fn test_advanced_pity_skipped_with_ssr_present() {
    let config = GachaConfig::default();
    // First draw SSR (roll 0.01 -> [0, 2)), the rest R
    let mut script = vec![0.01, 0.0];
    script.extend(std::iter::repeat(0.5).take(18));
    let batch = batch_draw_with_pity(ADVANCED, &config, &mut FixedRolls::new(script)).unwrap();

    assert_eq!(batch[0].rarity, Rarity::SSR);
    assert!(!batch.pity_triggered());
}

#[test]
fn test_legendary_pity_forces_ssr_and_sr_leaving_earlier_slots() {
    let config = GachaConfig::default();
    let table = config.table(LEGENDARY).unwrap();

    // 0.9 -> R on the legendary table: no SSR, no SR
    let raw = batch_draw(table, &config.pools, &mut FixedRolls::constant(0.9)).unwrap();
    let batch = batch_draw_with_pity(LEGENDARY, &config, &mut FixedRolls::constant(0.9)).unwrap();

    assert_eq!(batch[9].rarity, Rarity::SSR);
    assert_eq!(batch[8].rarity, Rarity::SR);
    assert_eq!(&batch.as_slice()[..8], &raw.as_slice()[..8]);
    assert_eq!(batch.pity_slots(), &[9, 8]);
}

#[test]
fn test_legendary_second_check_counts_after_first_replacement() {
    let config = GachaConfig::default();

    // Legendary bands: SSR [0, 10), SR [10, 50), R [50, 100).
    // SR at slots 0 and 9, R elsewhere, no SSR.
    let mut script = vec![0.3, 0.0];
    for _ in 1..9 {
        script.extend([0.9, 0.0]);
    }
    script.extend([0.3, 0.0]);
    // Rolls for the two forced rewards
    script.extend([0.0, 0.0]);

    let batch = batch_draw_with_pity(LEGENDARY, &config, &mut FixedRolls::new(script)).unwrap();

    // The SSR guarantee overwrote the SR at slot 9, leaving one SR, so the
    // SR guarantee fires on slot 8 as well.
    assert_eq!(batch[0].rarity, Rarity::SR);
    assert_eq!(batch[8].rarity, Rarity::SR);
    assert_eq!(batch[9].rarity, Rarity::SSR);
    assert_eq!(batch.count(Rarity::SR), 2);
    assert_eq!(batch.pity_slots(), &[9, 8]);
}

#[test]
fn test_legendary_pity_skipped_when_satisfied() {
    let config = GachaConfig::default();
    // SSR, SR, SR, then R
    let mut script = vec![0.05, 0.0, 0.3, 0.0, 0.3, 0.0];
    script.extend(std::iter::repeat(0.9).take(14));
    let batch = batch_draw_with_pity(LEGENDARY, &config, &mut FixedRolls::new(script)).unwrap();

    assert_eq!(batch.count(Rarity::SSR), 1);
    assert_eq!(batch.count(Rarity::SR), 2);
    assert!(!batch.pity_triggered());
}

#[test]
fn test_pity_forced_tier_with_empty_pool_errors() {
    let config = GachaConfig::new(
        default_pools().with_tier(Rarity::SR, Vec::new()),
        default_rates(),
    );
    let mut rolls = FixedRolls::constant(0.5);
    let err = batch_draw_with_pity(ADVANCED, &config, &mut rolls).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRewardList(Rarity::SR)));
}

#[test]
fn test_batch_results_are_copies() {
    let pools = RewardPool::new()
        .with_tier(Rarity::N, vec![Reward::new("minecraft:coal", 32, "Coal")])
        .with_tier(Rarity::R, vec![Reward::new("minecraft:diamond", 3, "Diamond")])
        .with_tier(Rarity::SR, vec![Reward::new("minecraft:nether_star", 1, "Star")])
        .with_tier(Rarity::SSR, vec![Reward::new("minecraft:elytra", 1, "Elytra")]);
    let config = GachaConfig::new(pools.clone(), default_rates());

    let batch = batch_draw_with_pity(NORMAL, &config, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
    let mut results = batch.into_vec();
    for result in &mut results {
        result.reward.count += 100;
    }
    assert_eq!(config.pools, pools);
}
