use soroban_sdk::{Env, IntoVal, Val};

pub const TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const TTL_EXTEND_TO: u32 = 3_110_400; // ~180 days

/// Extends the time-to-live of the instance storage. Instance TTL applies to
/// every key held in instance storage at once.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live of a single persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
