#![no_std]
mod contract;
mod error;
mod storage;

pub use contract::{PowerSwitch, PowerSwitchClient};
pub use error::ContractError;
