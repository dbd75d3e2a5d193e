use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const POOL: Symbol = symbol_short!("POOL");
const POOL_ASSET: Symbol = symbol_short!("POOL_AST");

// ── Types ────────────────────────────────────────────────────────────────────

/// One staking pool. The pool's index in the registry (its pid) never
/// changes once assigned.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    /// Asset stakers deposit into this pool.
    pub stake_asset: Address,
    /// Relative weight of the pool in the total emission.
    pub alloc_point: u64,
    /// Last block at which `acc_reward_per_share` was brought current.
    pub last_reward_block: u32,
    /// Cumulative reward per staked unit, scaled by `ACC_PRECISION`.
    pub acc_reward_per_share: i128,
    /// Stake held by the farm on behalf of this pool's stakers.
    pub total_staked: i128,
}

// ── Registry ─────────────────────────────────────────────────────────────────

fn pool_key(pid: u32) -> (Symbol, u32) {
    (POOL, pid)
}

fn asset_key(asset: &Address) -> (Symbol, Address) {
    (POOL_ASSET, asset.clone())
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, pid: u32) -> Option<PoolInfo> {
    env.storage().persistent().get(&pool_key(pid))
}

/// Writes `pool` and keeps its asset index entry alive alongside it.
pub fn store(env: &Env, pid: u32, pool: &PoolInfo) {
    let key = pool_key(pid);
    env.storage().persistent().set(&key, pool);
    ttl::extend_persistent(env, &key);
    ttl::extend_persistent(env, &asset_key(&pool.stake_asset));
}

/// Returns the pid already staking `asset`, if any.
pub fn find_by_asset(env: &Env, asset: &Address) -> Option<u32> {
    env.storage().persistent().get(&asset_key(asset))
}

/// Appends `pool` to the registry and returns its pid.
pub fn push(env: &Env, pool: &PoolInfo) -> u32 {
    let pid = count(env);
    env.storage()
        .persistent()
        .set(&asset_key(&pool.stake_asset), &pid);
    store(env, pid, pool);

    env.storage().instance().set(&POOL_COUNT, &(pid + 1));
    pid
}
