use curve::Curve;
use soroban_sdk::{contracttype, Env, Vec};

use crate::error::ContractError;

/// A funding tranche vesting linearly from `start` over `duration` seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSchedule {
    pub reward_amount: i128,
    pub duration: u64,
    pub start: u64,
}

impl RewardSchedule {
    /// Part of the tranche vested at `now`, capped at `reward_amount`.
    pub fn vested(&self, now: u64) -> Result<i128, ContractError> {
        let end = self
            .start
            .checked_add(self.duration)
            .ok_or(ContractError::ArithmeticError)?;
        let amount =
            u128::try_from(self.reward_amount).map_err(|_| ContractError::ArithmeticError)?;
        let vesting = Curve::saturating_linear((self.start, 0), (end, amount));
        i128::try_from(vesting.value(now)).map_err(|_| ContractError::ArithmeticError)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardScheduleAccumulator {
    pub schedules: Vec<RewardSchedule>,
    /// Reward tokens escrowed by the geyser and not yet paid out
    pub reward_pool_balance: i128,
    pub total_funded: i128,
    pub total_paid: i128,
}

impl RewardScheduleAccumulator {
    pub fn new(env: &Env) -> Self {
        RewardScheduleAccumulator {
            schedules: Vec::new(env),
            reward_pool_balance: 0,
            total_funded: 0,
            total_paid: 0,
        }
    }

    /// Escrows `amount` up front and appends a tranche vesting from `now`.
    pub fn fund(
        &mut self,
        amount: i128,
        duration: u64,
        now: u64,
    ) -> Result<RewardSchedule, ContractError> {
        if duration == 0 || now.checked_add(duration).is_none() {
            return Err(ContractError::InvalidDuration);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        self.reward_pool_balance = self
            .reward_pool_balance
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticError)?;
        self.total_funded = self
            .total_funded
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticError)?;

        let schedule = RewardSchedule {
            reward_amount: amount,
            duration,
            start: now,
        };
        self.schedules.push_back(schedule.clone());
        Ok(schedule)
    }

    /// Sum of every tranche vested at `now`, paid or not.
    pub fn unlocked_reward(&self, now: u64) -> Result<i128, ContractError> {
        self.schedules.iter().try_fold(0i128, |acc, schedule| {
            acc.checked_add(schedule.vested(now)?)
                .ok_or(ContractError::ArithmeticError)
        })
    }

    /// Vested reward that has not been paid out yet.
    pub fn available_reward(&self, now: u64) -> Result<i128, ContractError> {
        self.unlocked_reward(now)?
            .checked_sub(self.total_paid)
            .ok_or(ContractError::ArithmeticError)
    }

    /// Records a payout of `amount` from the pool.
    pub fn consume(&mut self, amount: i128, now: u64) -> Result<(), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount > self.available_reward(now)? {
            return Err(ContractError::InsufficientRewardPool);
        }

        self.reward_pool_balance = self
            .reward_pool_balance
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticError)?;
        self.total_paid = self
            .total_paid
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticError)?;
        Ok(())
    }
}
