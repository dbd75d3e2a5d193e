use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ttl;

// ── Storage key ──────────────────────────────────────────────────────────────

const AUTHORITY: Symbol = symbol_short!("AUTHORITY");

// ── Core functions ───────────────────────────────────────────────────────────

/// Installs the initial authority holder.
///
/// Only called from `initialize`; callers must have checked that the
/// contract is not already initialized.
pub fn init(env: &Env, holder: &Address) {
    env.storage().instance().set(&AUTHORITY, holder);
    ttl::extend_instance(env);
}

/// Returns the current holder, if the authority has been installed.
pub fn holder(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AUTHORITY)
}

/// Returns `true` when `caller` is the current holder.
///
/// The caller must have already been authenticated via `require_auth()`.
pub fn is_holder(env: &Env, caller: &Address) -> bool {
    match holder(env) {
        Some(current) => current == *caller,
        None => false,
    }
}

/// Hands the authority to `new_holder` if `caller` currently holds it.
///
/// Returns the previous holder on success, `None` if `caller` is not the
/// holder. There is exactly one holder at any time.
pub fn transfer(env: &Env, caller: &Address, new_holder: &Address) -> Option<Address> {
    if !is_holder(env, caller) {
        return None;
    }
    env.storage().instance().set(&AUTHORITY, new_holder);
    ttl::extend_instance(env);
    Some(caller.clone())
}
