//! Client interfaces the staking pool uses to reach the collaborating contracts.
//! Failing calls abort the whole invocation, so the methods here return plain values.

use soroban_sdk::{contractclient, Address, Env};

use crate::types::PowerSwitchStatus;

#[contractclient(name = "PowerSwitchClient")]
pub trait PowerSwitchInterface {
    fn query_status(env: Env) -> PowerSwitchStatus;
}

#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn deposit(env: Env, owner: Address, amount: i128);

    fn lock(env: Env, geyser: Address, owner: Address, amount: i128);

    fn unlock(env: Env, geyser: Address, owner: Address, amount: i128);

    fn query_token(env: Env) -> Address;

    fn query_available(env: Env, owner: Address) -> i128;
}
