use soroban_sdk::{contracttype, Address};

/// Governance state of a power switch. `Shutdown` is terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerSwitchStatus {
    Online,
    Offline,
    Shutdown,
}

impl PowerSwitchStatus {
    /// Online and Offline toggle between each other, both may fall into Shutdown,
    /// nothing leaves Shutdown and a state never transitions into itself.
    pub fn can_transition_to(&self, target: &PowerSwitchStatus) -> bool {
        matches!(
            (self, target),
            (PowerSwitchStatus::Online, PowerSwitchStatus::Offline)
                | (PowerSwitchStatus::Offline, PowerSwitchStatus::Online)
                | (PowerSwitchStatus::Online, PowerSwitchStatus::Shutdown)
                | (PowerSwitchStatus::Offline, PowerSwitchStatus::Shutdown)
        )
    }

    pub fn is_shutdown(&self) -> bool {
        *self == PowerSwitchStatus::Shutdown
    }
}

/// Commitment of vault funds to a geyser. Only `geyser` can release it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    pub geyser: Address,
    pub amount: i128,
    /// Ledger timestamp of the most recent lock increase
    pub lock_timestamp: u64,
}
