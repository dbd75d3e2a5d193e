#![allow(dead_code)]

use farm::{FarmContract, FarmContractClient};
use reward_vault::{RewardVault, RewardVaultClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

pub struct TestContext {
    pub env: Env,
    pub client: FarmContractClient<'static>,
    pub vault: RewardVaultClient<'static>,
    pub reward_token: Address,
    pub admin: Address,
    pub dev: Address,
}

/// Deploys a reward token, a vault and a farm, hands the token's mint
/// authority and the vault's ownership to the farm, and initializes it.
pub fn setup_farm(reward_per_block: i128, start_block: u32) -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let farm_id = env.register(FarmContract, ());
    let client = FarmContractClient::new(&env, &farm_id);

    let vault_id = env.register(RewardVault, ());
    let vault = RewardVaultClient::new(&env, &vault_id);
    vault.initialize(&farm_id, &reward_token);
    StellarAssetClient::new(&env, &reward_token).set_admin(&farm_id);

    let admin = Address::generate(&env);
    let dev = Address::generate(&env);
    client.initialize(
        &admin,
        &reward_token,
        &vault_id,
        &dev,
        &reward_per_block,
        &start_block,
    );

    TestContext {
        env,
        client,
        vault,
        reward_token,
        admin,
        dev,
    }
}

/// Registers a fresh stake asset and funds every holder with `amount`.
pub fn create_stake_asset(ctx: &TestContext, holders: &[&Address], amount: i128) -> Address {
    let asset = ctx
        .env
        .register_stellar_asset_contract_v2(Address::generate(&ctx.env))
        .address();
    let minter = StellarAssetClient::new(&ctx.env, &asset);
    for holder in holders {
        minter.mint(holder, &amount);
    }
    asset
}

pub fn advance_to(ctx: &TestContext, block: u32) {
    ctx.env.ledger().set_sequence_number(block);
}

pub fn reward_balance(ctx: &TestContext, id: &Address) -> i128 {
    TokenClient::new(&ctx.env, &ctx.reward_token).balance(id)
}

pub fn asset_balance(ctx: &TestContext, asset: &Address, id: &Address) -> i128 {
    TokenClient::new(&ctx.env, asset).balance(id)
}

/// Reward tokens minted so far: everything paid out plus the vault's float.
pub fn minted(ctx: &TestContext, holders: &[&Address]) -> i128 {
    let paid: i128 = holders.iter().map(|h| reward_balance(ctx, h)).sum();
    paid + reward_balance(ctx, &ctx.dev) + reward_balance(ctx, &ctx.vault.address)
}
