#![no_std]
mod access;
mod contract;
mod error;
mod events;
mod gate;
mod msg;
mod reward_schedule;
mod scaling;
mod stake_units;
mod storage;

pub use contract::{Geyser, GeyserClient};
pub use error::ContractError;
