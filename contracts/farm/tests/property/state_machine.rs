#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the farm.
//!
//! Random sequences of staker and admin actions are replayed against a farm
//! with two LP pools. After every step:
//! - each pool's `total_staked` equals the sum of its stakers' amounts and
//!   the farm's balance of the pool asset
//! - `total_alloc_point` equals the sum of every pool's weight
//! - no staker ever holds more or less LP than they started with, counting
//!   what is staked

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{testutils::Address as _, Address};

use crate::common::{advance_to, asset_balance, create_stake_asset, setup_farm, TestContext};

const STAKERS: usize = 3;
const FUNDING: i128 = 1_000_000;

#[derive(Clone, Debug, Arbitrary)]
enum Action {
    Deposit { staker: u8, pool: bool, amount: u16 },
    Withdraw { staker: u8, pool: bool, amount: u16 },
    Harvest { staker: u8, pool: bool },
    EmergencyWithdraw { staker: u8, pool: bool },
    Advance { blocks: u8 },
    SetAllocPoint { pool: bool, alloc_point: u8 },
    UpdatePool { pool: bool },
}

struct Harness {
    ctx: TestContext,
    stakers: [Address; STAKERS],
    assets: [Address; 2],
    pids: [u32; 2],
    block: u32,
}

impl Harness {
    fn new() -> Self {
        let ctx = setup_farm(250, 10);
        let stakers = [
            Address::generate(&ctx.env),
            Address::generate(&ctx.env),
            Address::generate(&ctx.env),
        ];
        let holders: [&Address; STAKERS] = [&stakers[0], &stakers[1], &stakers[2]];
        let assets = [
            create_stake_asset(&ctx, &holders, FUNDING),
            create_stake_asset(&ctx, &holders, FUNDING),
        ];
        let pids = [
            ctx.client.add_pool(&ctx.admin, &40, &assets[0], &true),
            ctx.client.add_pool(&ctx.admin, &60, &assets[1], &true),
        ];
        advance_to(&ctx, 10);
        Self {
            ctx,
            stakers,
            assets,
            pids,
            block: 10,
        }
    }

    fn staker(&self, index: u8) -> &Address {
        &self.stakers[usize::from(index) % STAKERS]
    }

    fn slot(pool: bool) -> usize {
        usize::from(pool)
    }

    fn apply(&mut self, action: &Action) {
        let client = &self.ctx.client;
        match *action {
            Action::Deposit { staker, pool, amount } => {
                let pid = self.pids[Self::slot(pool)];
                client.deposit(self.staker(staker), &pid, &i128::from(amount));
            }
            Action::Withdraw { staker, pool, amount } => {
                let pid = self.pids[Self::slot(pool)];
                let who = self.staker(staker);
                let staked = client.user_info(&pid, who).amount;
                let amount = i128::from(amount).min(staked);
                client.withdraw(who, &pid, &amount);
            }
            Action::Harvest { staker, pool } => {
                let pid = self.pids[Self::slot(pool)];
                client.deposit(self.staker(staker), &pid, &0);
            }
            Action::EmergencyWithdraw { staker, pool } => {
                let pid = self.pids[Self::slot(pool)];
                let who = self.staker(staker);
                let staked = client.user_info(&pid, who).amount;
                let returned = client.emergency_withdraw(who, &pid);
                assert_eq!(returned, staked);
            }
            Action::Advance { blocks } => {
                self.block += u32::from(blocks);
                advance_to(&self.ctx, self.block);
            }
            Action::SetAllocPoint { pool, alloc_point } => {
                let pid = self.pids[Self::slot(pool)];
                client.set_alloc_point(&self.ctx.admin, &pid, &u64::from(alloc_point), &true);
            }
            Action::UpdatePool { pool } => {
                client.update_pool(&self.pids[Self::slot(pool)]);
            }
        }
    }

    fn check_invariants(&self) -> Result<(), TestCaseError> {
        let client = &self.ctx.client;
        let farm = client.address.clone();

        for (slot, pid) in self.pids.iter().enumerate() {
            let pool = client.pool_info(pid);
            let staked: i128 = self
                .stakers
                .iter()
                .map(|s| client.user_info(pid, s).amount)
                .sum();
            prop_assert_eq!(pool.total_staked, staked);
            prop_assert_eq!(asset_balance(&self.ctx, &self.assets[slot], &farm), staked);

            for staker in &self.stakers {
                let held = asset_balance(&self.ctx, &self.assets[slot], staker);
                let in_farm = client.user_info(pid, staker).amount;
                prop_assert_eq!(held + in_farm, FUNDING);
            }
        }

        let alloc_sum: u64 = (0..client.pool_length())
            .map(|pid| client.pool_info(&pid).alloc_point)
            .sum();
        prop_assert_eq!(client.total_alloc_point(), alloc_sum);
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Any sequence of valid actions keeps the stake ledger and the weight
    /// total consistent.
    #[test]
    fn prop_random_actions_preserve_ledger(
        actions in proptest::collection::vec(any::<Action>(), 1..24),
    ) {
        let mut harness = Harness::new();
        for action in &actions {
            harness.apply(action);
            harness.check_invariants()?;
        }
    }

    /// Emergency withdraw returns the exact stake and moves no reward tokens.
    #[test]
    fn prop_emergency_withdraw_moves_no_reward(
        stake in 1u16..=u16::MAX,
        blocks in 1u8..=u8::MAX,
    ) {
        let mut harness = Harness::new();
        harness.apply(&Action::Deposit { staker: 0, pool: false, amount: stake });
        harness.apply(&Action::Advance { blocks });

        let ctx = &harness.ctx;
        let who = harness.staker(0).clone();
        let vault_before = crate::common::reward_balance(ctx, &ctx.vault.address);
        let dev_before = crate::common::reward_balance(ctx, &ctx.dev);

        let returned = ctx.client.emergency_withdraw(&who, &harness.pids[0]);

        prop_assert_eq!(returned, i128::from(stake));
        prop_assert_eq!(crate::common::reward_balance(ctx, &who), 0);
        prop_assert_eq!(crate::common::reward_balance(ctx, &ctx.vault.address), vault_before);
        prop_assert_eq!(crate::common::reward_balance(ctx, &ctx.dev), dev_before);
        prop_assert_eq!(ctx.client.user_info(&harness.pids[0], &who).amount, 0);
    }
}
