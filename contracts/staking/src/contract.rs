use geyser::{ensure_positive, PowerSwitchClient, PowerSwitchStatus, VaultClient};
use soroban_decimal::{mul_div_floor, Decimal};
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env, Vec};

use crate::{
    access::Role,
    error::ContractError,
    events::GeyserEvents,
    gate::{ensure_permitted, Operation},
    msg::{BonusReward, GeyserData, TokenBalance, UnstakeResponse},
    reward_schedule::{RewardSchedule, RewardScheduleAccumulator},
    scaling::{reward_share, RewardScalingCurve},
    stake_units::{StakeInfo, StakeRemoval, StakeUnitAccumulator},
    storage::{
        get_bonus_tokens, get_config, get_reward_schedules, get_stake_info, get_stake_units,
        get_vault_factories, is_initialized, save_bonus_tokens, save_config,
        save_reward_schedules, save_stake_info, save_stake_units, save_vault_factories,
        set_initialized, Config, RewardScaling, UnstakeOrder, MAX_BONUS_TOKENS,
        MAX_STAKES_PER_VAULT,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Geyser staking pool paying time-scaled rewards for stake held in vault ledgers"
);

#[contract]
pub struct Geyser;

pub trait GeyserTrait {
    fn initialize(
        env: Env,
        owner: Address,
        power_switch: Address,
        staking_token: Address,
        reward_token: Address,
        scaling: RewardScaling,
        unstake_order: UnstakeOrder,
    ) -> Result<(), ContractError>;

    /// Escrows `amount` of the reward token, vesting over `duration` seconds from now.
    fn fund_geyser(
        env: Env,
        sender: Address,
        amount: i128,
        duration: u64,
    ) -> Result<RewardSchedule, ContractError>;

    /// Locks `amount` of the owner's custody in `vault` against this geyser.
    fn stake(env: Env, vault: Address, owner: Address, amount: i128) -> Result<(), ContractError>;

    fn deposit_and_stake(
        env: Env,
        vault: Address,
        owner: Address,
        amount: i128,
    ) -> Result<(), ContractError>;

    /// Releases `amount` of stake and pays its scaled reward to `recipient`.
    fn unstake(
        env: Env,
        vault: Address,
        owner: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<UnstakeResponse, ContractError>;

    /// Releases all of the owner's stake without any reward. Works in every power state.
    fn emergency_withdraw(env: Env, vault: Address, owner: Address)
        -> Result<i128, ContractError>;

    fn register_vault_factory(
        env: Env,
        sender: Address,
        vault: Address,
    ) -> Result<(), ContractError>;

    fn remove_vault_factory(env: Env, sender: Address, vault: Address)
        -> Result<(), ContractError>;

    fn register_bonus_token(env: Env, sender: Address, token: Address)
        -> Result<(), ContractError>;

    /// Sends tokens accidentally transferred to the geyser to `recipient`.
    /// Of the reward token only the balance above the escrowed pool can leave.
    fn rescue_token(
        env: Env,
        sender: Address,
        token: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), ContractError>;

    fn transfer_ownership(
        env: Env,
        sender: Address,
        new_owner: Address,
    ) -> Result<Address, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<Config, ContractError>;

    fn query_owner(env: Env) -> Result<Address, ContractError>;

    fn query_geyser_data(env: Env) -> Result<GeyserData, ContractError>;

    fn query_stake_info(env: Env, vault: Address, owner: Address) -> StakeInfo;

    fn query_current_unlocked_rewards(env: Env) -> Result<i128, ContractError>;

    fn query_future_unlocked_rewards(env: Env, timestamp: u64) -> Result<i128, ContractError>;

    fn query_current_vault_reward(
        env: Env,
        vault: Address,
        owner: Address,
    ) -> Result<i128, ContractError>;

    fn query_vault_factories(env: Env) -> Vec<Address>;

    fn query_bonus_tokens(env: Env) -> Vec<Address>;
}

#[contractimpl]
impl GeyserTrait for Geyser {
    fn initialize(
        env: Env,
        owner: Address,
        power_switch: Address,
        staking_token: Address,
        reward_token: Address,
        scaling: RewardScaling,
        unstake_order: UnstakeOrder,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(&env, "Geyser: Initialize: initializing contract twice is not allowed");
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        if staking_token == reward_token {
            log!(&env, "Geyser: Initialize: staking and reward token must differ");
            return Err(ContractError::InvalidConfig);
        }
        RewardScalingCurve::new(&scaling)?;

        let config = Config {
            owner: owner.clone(),
            power_switch,
            staking_token: staking_token.clone(),
            reward_token: reward_token.clone(),
            scaling: scaling.clone(),
            unstake_order,
            max_stakes_per_vault: MAX_STAKES_PER_VAULT,
        };
        save_config(&env, &config);
        save_stake_units(&env, &StakeUnitAccumulator::new(env.ledger().timestamp()));
        save_reward_schedules(&env, &RewardScheduleAccumulator::new(&env));
        set_initialized(&env);

        GeyserEvents::initialize(&env, owner, staking_token, reward_token, scaling);

        Ok(())
    }

    fn fund_geyser(
        env: Env,
        sender: Address,
        amount: i128,
        duration: u64,
    ) -> Result<RewardSchedule, ContractError> {
        let config = get_config(&env)?;
        Role::Controller(sender.clone()).require(&env, &config)?;
        ensure_positive!(ContractError::InvalidAmount, amount);
        ensure_permitted(&power_status(&env, &config), Operation::Fund)?;

        let mut rewards = get_reward_schedules(&env);
        let schedule = rewards.fund(amount, duration, env.ledger().timestamp())?;
        save_reward_schedules(&env, &rewards);

        token::Client::new(&env, &config.reward_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        GeyserEvents::fund(&env, sender, schedule.clone());

        Ok(schedule)
    }

    fn stake(env: Env, vault: Address, owner: Address, amount: i128) -> Result<(), ContractError> {
        let config = get_config(&env)?;
        Role::VaultOwner(owner.clone()).require(&env, &config)?;
        Role::RegisteredVault(vault.clone()).require(&env, &config)?;
        ensure_positive!(ContractError::InvalidAmount, amount);
        ensure_permitted(&power_status(&env, &config), Operation::Stake)?;

        lock_stake(&env, &config, &vault, &owner, amount)
    }

    fn deposit_and_stake(
        env: Env,
        vault: Address,
        owner: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = get_config(&env)?;
        Role::VaultOwner(owner.clone()).require(&env, &config)?;
        Role::RegisteredVault(vault.clone()).require(&env, &config)?;
        ensure_positive!(ContractError::InvalidAmount, amount);
        ensure_permitted(&power_status(&env, &config), Operation::Stake)?;

        VaultClient::new(&env, &vault).deposit(&owner, &amount);

        lock_stake(&env, &config, &vault, &owner, amount)
    }

    fn unstake(
        env: Env,
        vault: Address,
        owner: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<UnstakeResponse, ContractError> {
        let config = get_config(&env)?;
        Role::VaultOwner(owner.clone()).require(&env, &config)?;
        ensure_positive!(ContractError::InvalidAmount, amount);
        ensure_permitted(&power_status(&env, &config), Operation::Unstake)?;

        let mut info = get_stake_info(&env, &vault, &owner);
        if amount > info.total_stake {
            log!(
                &env,
                "Geyser: Unstake: trying to unstake more than staked",
                amount,
                info.total_stake
            );
            return Err(ContractError::InsufficientStake);
        }

        let now = env.ledger().timestamp();
        let mut units = get_stake_units(&env);
        let mut rewards = get_reward_schedules(&env);
        let settlement = settle_unstake(
            &env,
            &config,
            &mut units,
            &mut rewards,
            &mut info,
            amount,
            now,
        )?;
        let bonus_rewards =
            bonus_payouts(&env, settlement.reward, settlement.pool_balance_before)?;

        save_stake_units(&env, &units);
        save_reward_schedules(&env, &rewards);
        save_stake_info(&env, &vault, &owner, &info);

        let geyser = env.current_contract_address();
        VaultClient::new(&env, &vault).unlock(&geyser, &owner, &amount);
        if settlement.reward > 0 {
            token::Client::new(&env, &config.reward_token).transfer(
                &geyser,
                &recipient,
                &settlement.reward,
            );
        }
        for bonus in bonus_rewards.iter() {
            token::Client::new(&env, &bonus.token).transfer(&geyser, &recipient, &bonus.amount);
            GeyserEvents::bonus_reward(&env, bonus.token, recipient.clone(), bonus.amount);
        }

        GeyserEvents::unstake(
            &env,
            vault,
            owner,
            amount,
            settlement.reward,
            recipient,
        );

        Ok(UnstakeResponse {
            amount,
            duration: settlement.removal.duration,
            multiplier: settlement.multiplier.atomics(),
            reward: settlement.reward,
            bonus_rewards,
        })
    }

    fn emergency_withdraw(
        env: Env,
        vault: Address,
        owner: Address,
    ) -> Result<i128, ContractError> {
        let config = get_config(&env)?;
        Role::VaultOwner(owner.clone()).require(&env, &config)?;
        ensure_permitted(&power_status(&env, &config), Operation::EmergencyWithdraw)?;

        let mut info = get_stake_info(&env, &vault, &owner);
        let amount = info.total_stake;
        if amount == 0 {
            log!(&env, "Geyser: Emergency withdraw: nothing staked");
            return Err(ContractError::InsufficientStake);
        }

        // The forfeited share stays in the reward pool for the remaining stakers.
        let mut units = get_stake_units(&env);
        units.unstake(
            &env,
            &mut info,
            amount,
            env.ledger().timestamp(),
            config.unstake_order,
        )?;
        save_stake_units(&env, &units);
        save_stake_info(&env, &vault, &owner, &info);

        VaultClient::new(&env, &vault).unlock(&env.current_contract_address(), &owner, &amount);

        GeyserEvents::emergency_withdraw(&env, vault, owner, amount);

        Ok(amount)
    }

    fn register_vault_factory(
        env: Env,
        sender: Address,
        vault: Address,
    ) -> Result<(), ContractError> {
        let config = get_config(&env)?;
        Role::Controller(sender).require(&env, &config)?;
        ensure_permitted(&power_status(&env, &config), Operation::Administer)?;

        let mut vaults = get_vault_factories(&env);
        if vaults.contains(&vault) {
            log!(&env, "Geyser: Register vault factory: already registered");
            return Err(ContractError::VaultFactoryExists);
        }
        match VaultClient::new(&env, &vault).try_query_token() {
            Ok(Ok(token)) if token == config.staking_token => {}
            Ok(Ok(_)) => {
                log!(
                    &env,
                    "Geyser: Register vault factory: custody token is not the staking token"
                );
                return Err(ContractError::InvalidConfig);
            }
            _ => {
                log!(
                    &env,
                    "Geyser: Register vault factory: address does not answer as a vault"
                );
                return Err(ContractError::InvalidConfig);
            }
        }

        vaults.push_back(vault.clone());
        save_vault_factories(&env, &vaults);

        GeyserEvents::register_vault_factory(&env, vault);

        Ok(())
    }

    fn remove_vault_factory(
        env: Env,
        sender: Address,
        vault: Address,
    ) -> Result<(), ContractError> {
        let config = get_config(&env)?;
        Role::Controller(sender).require(&env, &config)?;

        let mut vaults = get_vault_factories(&env);
        let index = vaults.first_index_of(&vault).ok_or_else(|| {
            log!(&env, "Geyser: Remove vault factory: not registered");
            ContractError::VaultFactoryNotFound
        })?;
        vaults.remove(index);
        save_vault_factories(&env, &vaults);

        GeyserEvents::remove_vault_factory(&env, vault);

        Ok(())
    }

    fn register_bonus_token(
        env: Env,
        sender: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        let config = get_config(&env)?;
        Role::Controller(sender).require(&env, &config)?;
        ensure_permitted(&power_status(&env, &config), Operation::RegisterBonusToken)?;

        if token == config.staking_token || token == config.reward_token {
            log!(&env, "Geyser: Register bonus token: token is protected");
            return Err(ContractError::ProtectedToken);
        }
        let mut tokens = get_bonus_tokens(&env);
        if tokens.contains(&token) {
            log!(&env, "Geyser: Register bonus token: already registered");
            return Err(ContractError::BonusTokenExists);
        }
        if tokens.len() >= MAX_BONUS_TOKENS {
            log!(&env, "Geyser: Register bonus token: bonus token limit reached");
            return Err(ContractError::MaxBonusTokensReached);
        }

        tokens.push_back(token.clone());
        save_bonus_tokens(&env, &tokens);

        GeyserEvents::register_bonus_token(&env, token);

        Ok(())
    }

    fn rescue_token(
        env: Env,
        sender: Address,
        token: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = get_config(&env)?;
        Role::Controller(sender).require(&env, &config)?;
        ensure_positive!(ContractError::InvalidAmount, amount);
        ensure_permitted(&power_status(&env, &config), Operation::Administer)?;

        if token == config.staking_token || get_bonus_tokens(&env).contains(&token) {
            log!(&env, "Geyser: Rescue: token is protected");
            return Err(ContractError::ProtectedToken);
        }
        if token == config.reward_token {
            let escrowed = get_reward_schedules(&env).reward_pool_balance;
            let surplus = token::Client::new(&env, &token)
                .balance(&env.current_contract_address())
                .checked_sub(escrowed)
                .ok_or(ContractError::ArithmeticError)?;
            if amount > surplus {
                log!(
                    &env,
                    "Geyser: Rescue: amount exceeds the unescrowed reward balance",
                    amount,
                    surplus
                );
                return Err(ContractError::ProtectedToken);
            }
        }

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &recipient,
            &amount,
        );

        GeyserEvents::rescue(&env, token, recipient, amount);

        Ok(())
    }

    fn transfer_ownership(
        env: Env,
        sender: Address,
        new_owner: Address,
    ) -> Result<Address, ContractError> {
        let mut config = get_config(&env)?;
        Role::Controller(sender.clone()).require(&env, &config)?;
        if new_owner == config.owner {
            log!(&env, "Geyser: Transfer ownership: new owner is the current owner");
            return Err(ContractError::SameOwner);
        }

        config.owner = new_owner.clone();
        save_config(&env, &config);

        GeyserEvents::transfer_ownership(&env, sender, new_owner.clone());

        Ok(new_owner)
    }

    fn query_config(env: Env) -> Result<Config, ContractError> {
        get_config(&env)
    }

    fn query_owner(env: Env) -> Result<Address, ContractError> {
        Ok(get_config(&env)?.owner)
    }

    fn query_geyser_data(env: Env) -> Result<GeyserData, ContractError> {
        let config = get_config(&env)?;
        let now = env.ledger().timestamp();
        let geyser = env.current_contract_address();

        let mut units = get_stake_units(&env);
        units.accrue(now)?;
        let rewards = get_reward_schedules(&env);

        let mut reward_pool_balances = Vec::new(&env);
        reward_pool_balances.push_back(TokenBalance {
            token: config.reward_token.clone(),
            balance: rewards.reward_pool_balance,
        });
        for token in get_bonus_tokens(&env).iter() {
            let balance = token::Client::new(&env, &token).balance(&geyser);
            reward_pool_balances.push_back(TokenBalance { token, balance });
        }

        Ok(GeyserData {
            power_switch_status: power_status(&env, &config),
            owner: config.owner,
            staking_token: config.staking_token,
            reward_token: config.reward_token,
            total_stake: units.total_stake,
            total_stake_units: units.total_stake_units,
            scaling: config.scaling,
            unlocked_reward: rewards.unlocked_reward(now)?,
            available_reward: rewards.available_reward(now)?,
            reward_pool_balance: rewards.reward_pool_balance,
            reward_pool_balances,
            reward_schedules: rewards.schedules,
            last_update: units.last_update,
            power_switch: config.power_switch,
        })
    }

    fn query_stake_info(env: Env, vault: Address, owner: Address) -> StakeInfo {
        get_stake_info(&env, &vault, &owner)
    }

    fn query_current_unlocked_rewards(env: Env) -> Result<i128, ContractError> {
        get_config(&env)?;
        get_reward_schedules(&env).available_reward(env.ledger().timestamp())
    }

    fn query_future_unlocked_rewards(env: Env, timestamp: u64) -> Result<i128, ContractError> {
        get_config(&env)?;
        // Vesting never runs backwards, so past timestamps report the current amount.
        let timestamp = timestamp.max(env.ledger().timestamp());
        get_reward_schedules(&env).available_reward(timestamp)
    }

    fn query_current_vault_reward(
        env: Env,
        vault: Address,
        owner: Address,
    ) -> Result<i128, ContractError> {
        let config = get_config(&env)?;
        let mut info = get_stake_info(&env, &vault, &owner);
        if info.total_stake == 0 {
            return Ok(0);
        }

        let amount = info.total_stake;
        let settlement = settle_unstake(
            &env,
            &config,
            &mut get_stake_units(&env),
            &mut get_reward_schedules(&env),
            &mut info,
            amount,
            env.ledger().timestamp(),
        )?;
        Ok(settlement.reward)
    }

    fn query_vault_factories(env: Env) -> Vec<Address> {
        get_vault_factories(&env)
    }

    fn query_bonus_tokens(env: Env) -> Vec<Address> {
        get_bonus_tokens(&env)
    }
}

fn power_status(env: &Env, config: &Config) -> PowerSwitchStatus {
    PowerSwitchClient::new(env, &config.power_switch).query_status()
}

/// Records a new position and commits the vault funds to this geyser.
fn lock_stake(
    env: &Env,
    config: &Config,
    vault: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let vault_client = VaultClient::new(env, vault);
    let available = vault_client.query_available(owner);
    if available < amount {
        log!(
            env,
            "Geyser: Stake: vault balance too low",
            available,
            amount
        );
        return Err(ContractError::InsufficientBalance);
    }

    let mut info = get_stake_info(env, vault, owner);
    if info.positions.len() >= config.max_stakes_per_vault {
        log!(env, "Geyser: Stake: too many open positions for this vault");
        return Err(ContractError::MaxStakesReached);
    }

    let mut units = get_stake_units(env);
    units.stake(&mut info, amount, env.ledger().timestamp())?;
    save_stake_units(env, &units);
    save_stake_info(env, vault, owner, &info);

    vault_client.lock(&env.current_contract_address(), owner, &amount);

    GeyserEvents::stake(env, vault.clone(), owner.clone(), amount);

    Ok(())
}

struct Settlement {
    removal: StakeRemoval,
    multiplier: Decimal,
    reward: i128,
    pool_balance_before: i128,
}

/// Removes `amount` of stake and pays out its scaled share of the unpaid vested reward.
/// Only the passed in state is touched, callers decide whether to persist it.
fn settle_unstake(
    env: &Env,
    config: &Config,
    units: &mut StakeUnitAccumulator,
    rewards: &mut RewardScheduleAccumulator,
    info: &mut StakeInfo,
    amount: i128,
    now: u64,
) -> Result<Settlement, ContractError> {
    let scaling = RewardScalingCurve::new(&config.scaling)?;
    let removal = units.unstake(env, info, amount, now, config.unstake_order)?;

    let share = reward_share(
        env,
        rewards.available_reward(now)?,
        removal.units_removed,
        removal.units_before,
    )?;
    let multiplier = scaling.multiplier(removal.duration);
    let reward = scaling.apply(share, removal.duration)?;

    let pool_balance_before = rewards.reward_pool_balance;
    rewards.consume(reward, now)?;

    Ok(Settlement {
        removal,
        multiplier,
        reward,
        pool_balance_before,
    })
}

/// Each bonus token pays the same fraction of its balance as the reward takes from the pool.
fn bonus_payouts(
    env: &Env,
    reward: i128,
    pool_balance_before: i128,
) -> Result<Vec<BonusReward>, ContractError> {
    let mut payouts = Vec::new(env);
    if reward <= 0 || pool_balance_before <= 0 {
        return Ok(payouts);
    }

    let geyser = env.current_contract_address();
    for token in get_bonus_tokens(env).iter() {
        let balance = token::Client::new(env, &token).balance(&geyser);
        if balance <= 0 {
            continue;
        }
        let amount = mul_div_floor(
            env,
            balance as u128,
            reward as u128,
            pool_balance_before as u128,
        )
        .ok_or(ContractError::ArithmeticError)?;
        let amount = i128::try_from(amount).map_err(|_| ContractError::ArithmeticError)?;
        if amount > 0 {
            payouts.push_back(BonusReward { token, amount });
        }
    }
    Ok(payouts)
}
