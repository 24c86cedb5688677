use soroban_sdk::{Address, Env, Symbol};

use crate::{reward_schedule::RewardSchedule, storage::RewardScaling};

pub struct GeyserEvents {}

impl GeyserEvents {
    /// Emitted once the geyser is configured
    ///
    /// - topics - `["initialize", owner: Address]`
    /// - data - `[staking_token: Address, reward_token: Address, scaling: RewardScaling]`
    pub fn initialize(
        e: &Env,
        owner: Address,
        staking_token: Address,
        reward_token: Address,
        scaling: RewardScaling,
    ) {
        let topics = (Symbol::new(e, "initialize"), owner);
        e.events()
            .publish(topics, (staking_token, reward_token, scaling));
    }

    /// Emitted when a new reward tranche is escrowed
    ///
    /// - topics - `["fund", sender: Address]`
    /// - data - `[schedule: RewardSchedule]`
    pub fn fund(e: &Env, sender: Address, schedule: RewardSchedule) {
        let topics = (Symbol::new(e, "fund"), sender);
        e.events().publish(topics, schedule);
    }

    /// - topics - `["stake", vault: Address, owner: Address]`
    /// - data - `[amount: i128]`
    pub fn stake(e: &Env, vault: Address, owner: Address, amount: i128) {
        let topics = (Symbol::new(e, "stake"), vault, owner);
        e.events().publish(topics, amount);
    }

    /// - topics - `["unstake", vault: Address, owner: Address]`
    /// - data - `[amount: i128, reward: i128, recipient: Address]`
    pub fn unstake(
        e: &Env,
        vault: Address,
        owner: Address,
        amount: i128,
        reward: i128,
        recipient: Address,
    ) {
        let topics = (Symbol::new(e, "unstake"), vault, owner);
        e.events().publish(topics, (amount, reward, recipient));
    }

    /// Emitted when a bonus token pays out alongside the reward token
    ///
    /// - topics - `["bonus_reward", token: Address, recipient: Address]`
    /// - data - `[amount: i128]`
    pub fn bonus_reward(e: &Env, token: Address, recipient: Address, amount: i128) {
        let topics = (Symbol::new(e, "bonus_reward"), token, recipient);
        e.events().publish(topics, amount);
    }

    /// Emitted when an owner pulls out principal without reward
    ///
    /// - topics - `["emergency_withdraw", vault: Address, owner: Address]`
    /// - data - `[amount: i128]`
    pub fn emergency_withdraw(e: &Env, vault: Address, owner: Address, amount: i128) {
        let topics = (Symbol::new(e, "emergency_withdraw"), vault, owner);
        e.events().publish(topics, amount);
    }

    pub fn register_vault_factory(e: &Env, vault: Address) {
        let topics = (Symbol::new(e, "register_vault_factory"),);
        e.events().publish(topics, vault);
    }

    pub fn remove_vault_factory(e: &Env, vault: Address) {
        let topics = (Symbol::new(e, "remove_vault_factory"),);
        e.events().publish(topics, vault);
    }

    pub fn register_bonus_token(e: &Env, token: Address) {
        let topics = (Symbol::new(e, "register_bonus_token"),);
        e.events().publish(topics, token);
    }

    /// - topics - `["rescue", token: Address]`
    /// - data - `[recipient: Address, amount: i128]`
    pub fn rescue(e: &Env, token: Address, recipient: Address, amount: i128) {
        let topics = (Symbol::new(e, "rescue"), token);
        e.events().publish(topics, (recipient, amount));
    }

    /// - topics - `["transfer_ownership", previous: Address]`
    /// - data - `[new_owner: Address]`
    pub fn transfer_ownership(e: &Env, previous: Address, new_owner: Address) {
        let topics = (Symbol::new(e, "transfer_ownership"), previous);
        e.events().publish(topics, new_owner);
    }
}
