#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub delay: u64,
    pub value_token: Address,
}

/// Fired when a call is scheduled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueuedEvent {
    pub key: BytesN<32>,
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub eta: u64,
}

/// Fired on every cancel. `was_queued` is `false` when the key was already
/// clear.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CancelledEvent {
    pub key: BytesN<32>,
    pub target: Address,
    pub signature: Symbol,
    pub eta: u64,
    pub was_queued: bool,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutedEvent {
    pub key: BytesN<32>,
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub eta: u64,
}

/// Fired when the target of an executed transaction failed. The key is
/// consumed regardless.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevertedEvent {
    pub key: BytesN<32>,
    pub target: Address,
    pub signature: Symbol,
    pub code: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelaySetEvent {
    pub previous: u64,
    pub delay: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingAdminSetEvent {
    pub pending_admin: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminAcceptedEvent {
    pub previous: Address,
    pub admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, delay: u64, value_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            delay,
            value_token,
        },
    );
}

pub fn publish_queued(
    env: &Env,
    key: BytesN<32>,
    target: Address,
    value: i128,
    signature: Symbol,
    eta: u64,
) {
    env.events().publish(
        (symbol_short!("QUEUE_TX"), target.clone()),
        QueuedEvent {
            key,
            target,
            value,
            signature,
            eta,
        },
    );
}

pub fn publish_cancelled(
    env: &Env,
    key: BytesN<32>,
    target: Address,
    signature: Symbol,
    eta: u64,
    was_queued: bool,
) {
    env.events().publish(
        (symbol_short!("CANCEL_TX"), target.clone()),
        CancelledEvent {
            key,
            target,
            signature,
            eta,
            was_queued,
        },
    );
}

pub fn publish_executed(
    env: &Env,
    key: BytesN<32>,
    target: Address,
    value: i128,
    signature: Symbol,
    eta: u64,
) {
    env.events().publish(
        (symbol_short!("EXEC_TX"), target.clone()),
        ExecutedEvent {
            key,
            target,
            value,
            signature,
            eta,
        },
    );
}

pub fn publish_reverted(env: &Env, key: BytesN<32>, target: Address, signature: Symbol, code: u32) {
    env.events().publish(
        (symbol_short!("TX_RVRT"), target.clone()),
        RevertedEvent {
            key,
            target,
            signature,
            code,
        },
    );
}

pub fn publish_delay_set(env: &Env, previous: u64, delay: u64) {
    env.events().publish(
        (symbol_short!("NEW_DELAY"),),
        DelaySetEvent { previous, delay },
    );
}

pub fn publish_pending_admin_set(env: &Env, pending_admin: Address) {
    env.events().publish(
        (symbol_short!("NEW_PADM"), pending_admin.clone()),
        PendingAdminSetEvent { pending_admin },
    );
}

pub fn publish_admin_accepted(env: &Env, previous: Address, admin: Address) {
    env.events().publish(
        (symbol_short!("NEW_ADM"), admin.clone()),
        AdminAcceptedEvent {
            previous,
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
