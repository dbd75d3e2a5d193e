use common::ttl;
use soroban_sdk::{symbol_short, xdr::ToXdr, Address, BytesN, Env, Symbol, Val, Vec};

// Queued transactions live in persistent storage under (prefix, key).
const QUEUED: Symbol = symbol_short!("QUEUED");

/// Identity of a queued call: `sha256` over the XDR encoding of
/// `(target, value, signature, data, eta)`.
///
/// Queue, cancel and execute all derive the key here.
pub fn key(
    env: &Env,
    target: &Address,
    value: i128,
    signature: &Symbol,
    data: &Vec<Val>,
    eta: u64,
) -> BytesN<32> {
    let payload = (target.clone(), value, signature.clone(), data.clone(), eta).to_xdr(env);
    env.crypto().sha256(&payload).into()
}

fn entry(key: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (QUEUED, key.clone())
}

pub fn contains(env: &Env, key: &BytesN<32>) -> bool {
    env.storage().persistent().has(&entry(key))
}

pub fn insert(env: &Env, key: &BytesN<32>) {
    let entry = entry(key);
    env.storage().persistent().set(&entry, &true);
    ttl::extend_persistent(env, &entry);
}

/// Clears `key`, returning whether it was queued.
pub fn remove(env: &Env, key: &BytesN<32>) -> bool {
    let entry = entry(key);
    let was_queued = env.storage().persistent().has(&entry);
    if was_queued {
        env.storage().persistent().remove(&entry);
    }
    was_queued
}
