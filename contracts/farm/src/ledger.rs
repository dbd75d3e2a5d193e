use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// Per-user persistent storage uses tuple keys:  (prefix, pid, user_address)
const USER: Symbol = symbol_short!("USER");

/// A staker's position in one pool.
///
/// Right after every settlement `reward_debt == amount * acc_reward_per_share / ACC_PRECISION`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    pub reward_debt: i128,
}

fn user_key(pid: u32, user: &Address) -> (Symbol, u32, Address) {
    (USER, pid, user.clone())
}

pub fn load(env: &Env, pid: u32, user: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&user_key(pid, user))
        .unwrap_or_default()
}

pub fn store(env: &Env, pid: u32, user: &Address, info: &UserInfo) {
    let key = user_key(pid, user);
    env.storage().persistent().set(&key, info);
    ttl::extend_persistent(env, &key);
}
