use curve::Curve;
use geyser::utils::is_valid_bps;
use soroban_decimal::{mul_div_floor, Decimal};
use soroban_sdk::Env;

use crate::{error::ContractError, storage::RewardScaling};

/// Maps how long stake was held to the fraction of its reward share paid out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardScalingCurve {
    curve: Curve,
}

impl RewardScalingCurve {
    pub fn new(params: &RewardScaling) -> Result<Self, ContractError> {
        if !is_valid_bps(params.floor_bps)
            || !is_valid_bps(params.ceiling_bps)
            || params.floor_bps > params.ceiling_bps
        {
            return Err(ContractError::InvalidConfig);
        }

        let floor = Decimal::bps(params.floor_bps as u64);
        let ceiling = Decimal::bps(params.ceiling_bps as u64);
        let curve =
            Curve::saturating_linear((0, floor.atomics()), (params.time, ceiling.atomics()));
        curve
            .validate_monotonic_increasing()
            .map_err(|_| ContractError::InvalidConfig)?;

        Ok(RewardScalingCurve { curve })
    }

    pub fn multiplier(&self, duration: u64) -> Decimal {
        Decimal::raw(self.curve.value(duration))
    }

    /// Part of `share` paid for stake held `duration` seconds, rounded down.
    pub fn apply(&self, share: i128, duration: u64) -> Result<i128, ContractError> {
        let share = u128::try_from(share).map_err(|_| ContractError::ArithmeticError)?;
        let payout = self
            .multiplier(duration)
            .checked_mul_floor(share)
            .ok_or(ContractError::ArithmeticError)?;
        i128::try_from(payout).map_err(|_| ContractError::ArithmeticError)
    }
}

/// `available * units_removed / units_before`, rounded down.
pub fn reward_share(
    env: &Env,
    available: i128,
    units_removed: i128,
    units_before: i128,
) -> Result<i128, ContractError> {
    if available < 0 || units_removed < 0 || units_removed > units_before {
        return Err(ContractError::ArithmeticError);
    }
    if units_before == 0 || available == 0 {
        return Ok(0);
    }
    let share = mul_div_floor(
        env,
        available as u128,
        units_removed as u128,
        units_before as u128,
    )
    .ok_or(ContractError::ArithmeticError)?;
    i128::try_from(share).map_err(|_| ContractError::ArithmeticError)
}
