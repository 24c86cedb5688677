use geyser::PowerSwitchStatus;
use soroban_sdk::{contracttype, Address, Vec};

use crate::{reward_schedule::RewardSchedule, storage::RewardScaling};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BonusReward {
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeResponse {
    pub amount: i128,
    /// Average holding time of the unstaked amount
    pub duration: u64,
    /// Scaling multiplier applied, 18 decimal places
    pub multiplier: u128,
    pub reward: i128,
    pub bonus_rewards: Vec<BonusReward>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBalance {
    pub token: Address,
    pub balance: i128,
}

/// Read model of a geyser, accrued to the ledger timestamp of the query.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeyserData {
    pub owner: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub total_stake: i128,
    pub total_stake_units: i128,
    pub scaling: RewardScaling,
    pub unlocked_reward: i128,
    pub available_reward: i128,
    pub reward_pool_balance: i128,
    pub reward_pool_balances: Vec<TokenBalance>,
    pub reward_schedules: Vec<RewardSchedule>,
    pub last_update: u64,
    pub power_switch: Address,
    pub power_switch_status: PowerSwitchStatus,
}
