#![no_main]

use arbitrary::Arbitrary;
use farm::{FarmContract, FarmContractClient, STAKING_POOL};
use libfuzzer_sys::fuzz_target;
use reward_vault::{RewardVault, RewardVaultClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { pool: u8, amount: u32 },
    Withdraw { pool: u8, amount: u32 },
    EnterStaking { amount: u32 },
    LeaveStaking { amount: u32 },
    EmergencyWithdraw { pool: u8 },
    AddPool { alloc_point: u16 },
    SetAllocPoint { pool: u8, alloc_point: u16 },
    SetBonusMultiplier { multiplier: u8 },
    Advance { blocks: u16 },
}

// Stay inside the default entry TTL of the test ledger.
const MAX_BLOCK: u32 = 4_000;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let farm_id = env.register(FarmContract, ());
    let client = FarmContractClient::new(&env, &farm_id);
    let vault_id = env.register(RewardVault, ());
    RewardVaultClient::new(&env, &vault_id).initialize(&farm_id, &reward_token);
    StellarAssetClient::new(&env, &reward_token).set_admin(&farm_id);

    let admin = Address::generate(&env);
    let dev = Address::generate(&env);
    client.initialize(&admin, &reward_token, &vault_id, &dev, &1_000i128, &5u32);

    let mut users = vec![];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    let mut assets = vec![reward_token.clone()];
    let mut block = 1u32;

    // The reward token is pool 0's stake asset; seed it like any LP.
    let reward_minter = StellarAssetClient::new(&env, &reward_token);
    for user in &users {
        reward_minter.mint(user, &1_000_000_000i128);
    }

    // Panics other than contract errors surface as crashes. Contract errors
    // are expected and ignored.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        let pid_of = |pool: u8| u32::from(pool) % client.pool_length();
        match action {
            FuzzAction::Deposit { pool, amount } => {
                let _ = client.try_deposit(caller, &pid_of(pool), &i128::from(amount));
            }
            FuzzAction::Withdraw { pool, amount } => {
                let _ = client.try_withdraw(caller, &pid_of(pool), &i128::from(amount));
            }
            FuzzAction::EnterStaking { amount } => {
                let _ = client.try_enter_staking(caller, &i128::from(amount));
            }
            FuzzAction::LeaveStaking { amount } => {
                let _ = client.try_leave_staking(caller, &i128::from(amount));
            }
            FuzzAction::EmergencyWithdraw { pool } => {
                let _ = client.try_emergency_withdraw(caller, &pid_of(pool));
            }
            FuzzAction::AddPool { alloc_point } => {
                if assets.len() >= 6 {
                    continue;
                }
                let asset = env
                    .register_stellar_asset_contract_v2(Address::generate(&env))
                    .address();
                let minter = StellarAssetClient::new(&env, &asset);
                for user in &users {
                    minter.mint(user, &1_000_000_000i128);
                }
                if client
                    .try_add_pool(&admin, &u64::from(alloc_point), &asset, &true)
                    .is_ok()
                {
                    assets.push(asset);
                }
            }
            FuzzAction::SetAllocPoint { pool, alloc_point } => {
                let _ = client.try_set_alloc_point(
                    &admin,
                    &pid_of(pool),
                    &u64::from(alloc_point),
                    &true,
                );
            }
            FuzzAction::SetBonusMultiplier { multiplier } => {
                let _ = client.try_set_bonus_multiplier(&admin, &u64::from(multiplier));
            }
            FuzzAction::Advance { blocks } => {
                block = block.saturating_add(u32::from(blocks)).min(MAX_BLOCK);
                env.ledger().set_sequence_number(block);
            }
        }

        // Stake held per pool must match the ledger. Emission never lands on
        // the farm itself, so its reward token balance is pool 0's stake.
        for (pid, asset) in assets.iter().enumerate().skip(1) {
            let pool = client.pool_info(&(pid as u32));
            let held = TokenClient::new(&env, asset).balance(&farm_id);
            assert_eq!(pool.total_staked, held);
        }
        let staking = client.pool_info(&STAKING_POOL);
        assert_eq!(
            TokenClient::new(&env, &reward_token).balance(&farm_id),
            staking.total_staked
        );
    }
});
