use geyser::ttl::{extend_instance, extend_persistent};
use soroban_sdk::{contracttype, log, vec, Address, Env, Vec};

use crate::{
    error::ContractError,
    reward_schedule::RewardScheduleAccumulator,
    stake_units::{StakeInfo, StakeUnitAccumulator},
};

/// Open positions a single vault may hold against one geyser.
pub const MAX_STAKES_PER_VAULT: u32 = 30;
pub const MAX_BONUS_TOKENS: u32 = 50;

/// Order in which positions are consumed when a vault unstakes.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnstakeOrder {
    /// Oldest positions first
    Fifo,
    /// Newest positions first
    Lifo,
}

/// Reward multiplier parameters, fractions expressed in basis points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardScaling {
    /// Multiplier applied to a position unstaked immediately
    pub floor_bps: i64,
    /// Multiplier applied to a position held for at least `time` seconds
    pub ceiling_bps: i64,
    pub time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub owner: Address,
    pub power_switch: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub scaling: RewardScaling,
    pub unstake_order: UnstakeOrder,
    pub max_stakes_per_vault: u32,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
    RewardSchedules,
    StakeUnits,
    VaultFactories,
    BonusTokens,
    Stakes(Address, Address),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    extend_instance(env);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance(env);
}

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    extend_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or_else(|| {
            log!(env, "Geyser: Config not set, call initialize first");
            ContractError::NotInitialized
        })
}

pub fn get_reward_schedules(env: &Env) -> RewardScheduleAccumulator {
    extend_persistent(env, &DataKey::RewardSchedules);
    env.storage()
        .persistent()
        .get(&DataKey::RewardSchedules)
        .unwrap_or_else(|| RewardScheduleAccumulator::new(env))
}

pub fn save_reward_schedules(env: &Env, rewards: &RewardScheduleAccumulator) {
    env.storage()
        .persistent()
        .set(&DataKey::RewardSchedules, rewards);
    extend_persistent(env, &DataKey::RewardSchedules);
}

pub fn get_stake_units(env: &Env) -> StakeUnitAccumulator {
    extend_persistent(env, &DataKey::StakeUnits);
    env.storage()
        .persistent()
        .get(&DataKey::StakeUnits)
        .unwrap_or_else(|| StakeUnitAccumulator::new(env.ledger().timestamp()))
}

pub fn save_stake_units(env: &Env, units: &StakeUnitAccumulator) {
    env.storage().persistent().set(&DataKey::StakeUnits, units);
    extend_persistent(env, &DataKey::StakeUnits);
}

pub fn get_stake_info(env: &Env, vault: &Address, owner: &Address) -> StakeInfo {
    let key = DataKey::Stakes(vault.clone(), owner.clone());
    extend_persistent(env, &key);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| StakeInfo::new(env))
}

pub fn save_stake_info(env: &Env, vault: &Address, owner: &Address, info: &StakeInfo) {
    let key = DataKey::Stakes(vault.clone(), owner.clone());
    if info.positions.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, info);
    extend_persistent(env, &key);
}

pub fn get_vault_factories(env: &Env) -> Vec<Address> {
    extend_persistent(env, &DataKey::VaultFactories);
    env.storage()
        .persistent()
        .get(&DataKey::VaultFactories)
        .unwrap_or_else(|| vec![env])
}

pub fn save_vault_factories(env: &Env, vaults: &Vec<Address>) {
    env.storage()
        .persistent()
        .set(&DataKey::VaultFactories, vaults);
    extend_persistent(env, &DataKey::VaultFactories);
}

pub fn get_bonus_tokens(env: &Env) -> Vec<Address> {
    extend_persistent(env, &DataKey::BonusTokens);
    env.storage()
        .persistent()
        .get(&DataKey::BonusTokens)
        .unwrap_or_else(|| vec![env])
}

pub fn save_bonus_tokens(env: &Env, tokens: &Vec<Address>) {
    env.storage().persistent().set(&DataKey::BonusTokens, tokens);
    extend_persistent(env, &DataKey::BonusTokens);
}
