#![no_std]
mod contract;
mod error;
mod guard;
mod storage;

pub use contract::{Vault, VaultClient};
pub use error::ContractError;
