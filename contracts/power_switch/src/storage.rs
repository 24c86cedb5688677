use geyser::{ttl::extend_instance, PowerSwitchStatus};
use soroban_sdk::{log, panic_with_error, Address, ConversionError, Env, TryFromVal, Val};

use crate::error::ContractError;

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Owner = 0,
    Status = 1,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

pub fn save_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    extend_instance(env);
}

pub fn get_owner(env: &Env) -> Address {
    extend_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .unwrap_or_else(|| {
            log!(env, "PowerSwitch: Owner not set");
            panic_with_error!(env, ContractError::OwnerNotSet)
        })
}

pub fn save_status(env: &Env, status: &PowerSwitchStatus) {
    env.storage().instance().set(&DataKey::Status, status);
    extend_instance(env);
}

pub fn get_status(env: &Env) -> PowerSwitchStatus {
    extend_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or(PowerSwitchStatus::Online)
}
