#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - `pending_reward` never mutates state and returns the same value twice
//! - A lone staker harvests exactly what `pending_reward` reported
//! - Pools never emit more than `reward_per_block * bonus_multiplier` per block

use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, Address};

use crate::common::{advance_to, create_stake_asset, reward_balance, setup_farm};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Reading pending reward is side-effect free.
    #[test]
    fn prop_pending_view_is_idempotent(
        stake in 1i128..=10_000,
        blocks in 1u32..=500,
        reward_per_block in 1i128..=1_000_000,
    ) {
        let ctx = setup_farm(reward_per_block, 10);
        let staker = Address::generate(&ctx.env);
        let lp = create_stake_asset(&ctx, &[&staker], stake);
        let pid = ctx.client.add_pool(&ctx.admin, &100, &lp, &true);

        advance_to(&ctx, 20);
        ctx.client.deposit(&staker, &pid, &stake);
        advance_to(&ctx, 20 + blocks);

        let before = ctx.client.pool_info(&pid);
        let first = ctx.client.pending_reward(&pid, &staker);
        let second = ctx.client.pending_reward(&pid, &staker);

        prop_assert_eq!(first, second);
        prop_assert_eq!(ctx.client.pool_info(&pid), before);
        prop_assert_eq!(reward_balance(&ctx, &ctx.vault.address), 0);
    }

    /// With a single staker the vault always holds enough to pay the whole
    /// pending amount, and the staker never earns more than was emitted.
    #[test]
    fn prop_harvest_pays_pending_for_single_staker(
        stake in 1i128..=1_000_000,
        blocks in 1u32..=1_000,
        multiplier in 1u64..=20,
    ) {
        let ctx = setup_farm(100, 10);
        ctx.client.set_bonus_multiplier(&ctx.admin, &multiplier);
        let staker = Address::generate(&ctx.env);
        let lp = create_stake_asset(&ctx, &[&staker], stake);
        let pid = ctx.client.add_pool(&ctx.admin, &1, &lp, &true);

        advance_to(&ctx, 20);
        ctx.client.deposit(&staker, &pid, &stake);
        advance_to(&ctx, 20 + blocks);

        let pending = ctx.client.pending_reward(&pid, &staker);
        ctx.client.deposit(&staker, &pid, &0);

        prop_assert_eq!(reward_balance(&ctx, &staker), pending);
        prop_assert!(pending <= i128::from(blocks) * 100 * i128::from(multiplier));
        prop_assert_eq!(ctx.client.pending_reward(&pid, &staker), 0);
    }

    /// Two weighted pools together mint at most the full emission rate and
    /// lose at most one unit each to rounding.
    #[test]
    fn prop_emission_respects_rate(
        alloc_a in 1u64..=1_000,
        alloc_b in 1u64..=1_000,
        blocks in 1u32..=1_000,
    ) {
        let ctx = setup_farm(1_000, 10);
        let alice = Address::generate(&ctx.env);
        let bob = Address::generate(&ctx.env);
        let lp_a = create_stake_asset(&ctx, &[&alice], 100);
        let lp_b = create_stake_asset(&ctx, &[&bob], 100);
        let pid_a = ctx.client.add_pool(&ctx.admin, &alloc_a, &lp_a, &true);
        let pid_b = ctx.client.add_pool(&ctx.admin, &alloc_b, &lp_b, &true);

        advance_to(&ctx, 20);
        ctx.client.deposit(&alice, &pid_a, &100);
        ctx.client.deposit(&bob, &pid_b, &100);
        advance_to(&ctx, 20 + blocks);
        ctx.client.mass_update_pools();

        let emitted = i128::from(blocks) * 1_000;
        let float = reward_balance(&ctx, &ctx.vault.address);
        prop_assert!(float <= emitted);
        prop_assert!(float >= emitted - 2);
        prop_assert!(reward_balance(&ctx, &ctx.dev) <= float / 8 + 2);
    }
}
