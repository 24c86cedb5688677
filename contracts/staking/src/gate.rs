use geyser::PowerSwitchStatus;

use crate::error::ContractError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Stake,
    Unstake,
    Fund,
    EmergencyWithdraw,
    RegisterBonusToken,
    /// Vault ledger registration and token rescue
    Administer,
}

/// Whether `operation` may run while the power switch reports `status`.
pub fn ensure_permitted(
    status: &PowerSwitchStatus,
    operation: Operation,
) -> Result<(), ContractError> {
    match (status, operation) {
        (_, Operation::EmergencyWithdraw) => Ok(()),
        (PowerSwitchStatus::Shutdown, _) => Err(ContractError::GeyserShutdown),
        (PowerSwitchStatus::Offline, Operation::Stake | Operation::RegisterBonusToken) => {
            Err(ContractError::GeyserOffline)
        }
        _ => Ok(()),
    }
}
