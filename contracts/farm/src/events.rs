#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub reward_vault: Address,
    pub dev_address: Address,
    pub reward_per_block: i128,
    pub start_block: u32,
}

/// Fired when a pool is appended to the registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pid: u32,
    pub stake_asset: Address,
    pub alloc_point: u64,
    pub total_alloc_point: u64,
}

/// Fired when a pool's weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocPointSetEvent {
    pub pid: u32,
    pub alloc_point: u64,
    pub total_alloc_point: u64,
}

/// Fired whenever a pool's accounting is advanced with a non-empty emission.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pid: u32,
    pub last_reward_block: u32,
    pub acc_reward_per_share: i128,
    pub pool_reward: i128,
    pub dev_fee: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BonusMultiplierSetEvent {
    pub bonus_multiplier: u64,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DevAddressSetEvent {
    pub previous: Address,
    pub dev_address: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityTransferredEvent {
    pub previous_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a user adds stake (including zero-amount harvests).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
    pub new_user_amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
    pub new_user_amount: i128,
}

/// Fired when a user bails out of a pool forfeiting pending reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub user: Address,
    pub pid: u32,
    pub amount: i128,
}

/// Fired when pending reward is paid out. `paid` is what the vault could
/// actually send.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestedEvent {
    pub user: Address,
    pub pid: u32,
    pub pending: i128,
    pub paid: i128,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    reward_vault: Address,
    dev_address: Address,
    reward_per_block: i128,
    start_block: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            reward_vault,
            dev_address,
            reward_per_block,
            start_block,
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pid: u32,
    stake_asset: Address,
    alloc_point: u64,
    total_alloc_point: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pid),
        PoolAddedEvent {
            pid,
            stake_asset,
            alloc_point,
            total_alloc_point,
        },
    );
}

pub fn publish_alloc_point_set(env: &Env, pid: u32, alloc_point: u64, total_alloc_point: u64) {
    env.events().publish(
        (symbol_short!("ALLOC_SET"), pid),
        AllocPointSetEvent {
            pid,
            alloc_point,
            total_alloc_point,
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    pid: u32,
    last_reward_block: u32,
    acc_reward_per_share: i128,
    pool_reward: i128,
    dev_fee: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pid),
        PoolUpdatedEvent {
            pid,
            last_reward_block,
            acc_reward_per_share,
            pool_reward,
            dev_fee,
        },
    );
}

pub fn publish_bonus_multiplier_set(env: &Env, bonus_multiplier: u64) {
    env.events().publish(
        (symbol_short!("MULT_SET"),),
        BonusMultiplierSetEvent {
            bonus_multiplier,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_dev_address_set(env: &Env, previous: Address, dev_address: Address) {
    env.events().publish(
        (symbol_short!("DEV_SET"),),
        DevAddressSetEvent {
            previous,
            dev_address,
        },
    );
}

pub fn publish_authority_transferred(env: &Env, previous_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("AUTH_XFER"), new_admin.clone()),
        AuthorityTransferredEvent {
            previous_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, user: Address, pid: u32, amount: i128, new_user_amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pid),
        DepositedEvent {
            user,
            pid,
            amount,
            new_user_amount,
        },
    );
}

pub fn publish_withdrawn(env: &Env, user: Address, pid: u32, amount: i128, new_user_amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pid),
        WithdrawnEvent {
            user,
            pid,
            amount,
            new_user_amount,
        },
    );
}

pub fn publish_emergency_withdrawn(env: &Env, user: Address, pid: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), user.clone(), pid),
        EmergencyWithdrawnEvent { user, pid, amount },
    );
}

pub fn publish_harvested(env: &Env, user: Address, pid: u32, pending: i128, paid: i128) {
    env.events().publish(
        (symbol_short!("HARVEST"), user.clone(), pid),
        HarvestedEvent {
            user,
            pid,
            pending,
            paid,
        },
    );
}
