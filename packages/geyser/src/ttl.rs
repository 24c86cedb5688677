use soroban_sdk::{Env, IntoVal, Val};

pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance entries (config, flags) are refreshed to 7 days once they drop below 6.
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// Persistent entries (stakes, schedules, locks) are refreshed to 30 days once they drop below 29.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

/// Bumps a persistent entry, but only if it exists; missing keys are a no-op.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    if env.storage().persistent().has(key) {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }
}
