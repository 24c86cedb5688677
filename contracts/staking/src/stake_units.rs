use soroban_decimal::mul_div_floor;
use soroban_sdk::{contracttype, Env, Vec};

use crate::{error::ContractError, storage::UnstakeOrder};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    pub timestamp: u64,
}

/// Positions a vault holds against the geyser, oldest first.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeInfo {
    pub positions: Vec<StakePosition>,
    pub total_stake: i128,
}

impl StakeInfo {
    pub fn new(env: &Env) -> Self {
        StakeInfo {
            positions: Vec::new(env),
            total_stake: 0,
        }
    }
}

/// Pool-wide stake and its integral over time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeUnitAccumulator {
    pub total_stake: i128,
    pub total_stake_units: i128,
    pub last_update: u64,
}

/// Outcome of removing stake from a vault.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRemoval {
    pub units_removed: i128,
    pub units_before: i128,
    /// Average holding time of the removed stake, weighted by amount
    pub duration: u64,
}

impl StakeUnitAccumulator {
    pub fn new(now: u64) -> Self {
        StakeUnitAccumulator {
            total_stake: 0,
            total_stake_units: 0,
            last_update: now,
        }
    }

    /// Adds the area under the stake curve since the last update.
    pub fn accrue(&mut self, now: u64) -> Result<(), ContractError> {
        let elapsed = now
            .checked_sub(self.last_update)
            .ok_or(ContractError::ArithmeticError)?;
        let accrued = self
            .total_stake
            .checked_mul(i128::from(elapsed))
            .ok_or(ContractError::ArithmeticError)?;
        self.total_stake_units = self
            .total_stake_units
            .checked_add(accrued)
            .ok_or(ContractError::ArithmeticError)?;
        self.last_update = now;
        Ok(())
    }

    pub fn stake(
        &mut self,
        info: &mut StakeInfo,
        amount: i128,
        now: u64,
    ) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        self.accrue(now)?;

        self.total_stake = self
            .total_stake
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticError)?;
        info.total_stake = info
            .total_stake
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticError)?;
        info.positions.push_back(StakePosition {
            amount,
            timestamp: now,
        });
        Ok(())
    }

    /// Removes `amount` from the vault's positions in `order` and takes the
    /// matching share of the pool's units: `units * amount / total_stake`.
    pub fn unstake(
        &mut self,
        env: &Env,
        info: &mut StakeInfo,
        amount: i128,
        now: u64,
        order: UnstakeOrder,
    ) -> Result<StakeRemoval, ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        self.accrue(now)?;

        if amount > info.total_stake {
            return Err(ContractError::InsufficientStake);
        }
        if amount > self.total_stake {
            return Err(ContractError::ArithmeticError);
        }

        let duration = remove_positions(info, amount, now, order)?;

        let units_before = self.total_stake_units;
        let units_removed = if amount == self.total_stake {
            units_before
        } else {
            let units = mul_div_floor(
                env,
                units_before as u128,
                amount as u128,
                self.total_stake as u128,
            )
            .ok_or(ContractError::ArithmeticError)?;
            i128::try_from(units).map_err(|_| ContractError::ArithmeticError)?
        };

        self.total_stake_units = units_before
            .checked_sub(units_removed)
            .ok_or(ContractError::ArithmeticError)?;
        self.total_stake = self
            .total_stake
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticError)?;
        info.total_stake = info
            .total_stake
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticError)?;

        Ok(StakeRemoval {
            units_removed,
            units_before,
            duration,
        })
    }
}

/// Pops positions until `amount` is covered, splitting the last one touched.
/// Returns the amount-weighted average holding time of what was removed.
fn remove_positions(
    info: &mut StakeInfo,
    amount: i128,
    now: u64,
    order: UnstakeOrder,
) -> Result<u64, ContractError> {
    let mut remaining = amount;
    let mut weighted_time: i128 = 0;

    while remaining > 0 {
        let position = match order {
            UnstakeOrder::Fifo => info.positions.pop_front(),
            UnstakeOrder::Lifo => info.positions.pop_back(),
        }
        .ok_or(ContractError::InsufficientStake)?;

        let taken = remaining.min(position.amount);
        let held = now
            .checked_sub(position.timestamp)
            .ok_or(ContractError::ArithmeticError)?;
        weighted_time = taken
            .checked_mul(i128::from(held))
            .and_then(|time| weighted_time.checked_add(time))
            .ok_or(ContractError::ArithmeticError)?;

        if position.amount > taken {
            let rest = StakePosition {
                amount: position.amount - taken,
                timestamp: position.timestamp,
            };
            match order {
                UnstakeOrder::Fifo => info.positions.push_front(rest),
                UnstakeOrder::Lifo => info.positions.push_back(rest),
            }
        }
        remaining -= taken;
    }

    u64::try_from(weighted_time / amount).map_err(|_| ContractError::ArithmeticError)
}
