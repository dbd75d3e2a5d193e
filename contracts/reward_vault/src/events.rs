#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the vault is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub timestamp: u64,
}

/// Fired when receipt shares are minted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub amount: i128,
    pub total_supply: i128,
}

/// Fired when receipt shares are burned.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnedEvent {
    pub from: Address,
    pub amount: i128,
    pub total_supply: i128,
}

/// Fired on every capped payout. `paid` may be lower than `requested`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub to: Address,
    pub requested: i128,
    pub paid: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, reward_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_minted(env: &Env, to: Address, amount: i128, total_supply: i128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintedEvent {
            to,
            amount,
            total_supply,
        },
    );
}

pub fn publish_burned(env: &Env, from: Address, amount: i128, total_supply: i128) {
    env.events().publish(
        (symbol_short!("BURN"), from.clone()),
        BurnedEvent {
            from,
            amount,
            total_supply,
        },
    );
}

pub fn publish_reward_paid(env: &Env, to: Address, requested: i128, paid: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), to.clone()),
        RewardPaidEvent {
            to,
            requested,
            paid,
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_XFER"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
