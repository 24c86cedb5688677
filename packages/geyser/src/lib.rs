#![no_std]

pub mod interfaces;
pub mod ttl;
pub mod types;
pub mod utils;

pub use interfaces::{PowerSwitchClient, VaultClient};
pub use types::{Lock, PowerSwitchStatus};
