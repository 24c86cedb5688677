use geyser::PowerSwitchStatus;
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Symbol};

use crate::{
    error::ContractError,
    storage::{get_owner, get_status, save_owner, save_status},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Geyser power switch gating staking pool operations"
);

#[contract]
pub struct PowerSwitch;

pub trait PowerSwitchTrait {
    /// Moves the switch to `target`. Only the owner may call it and only edges of
    /// Online <-> Offline, Online -> Shutdown and Offline -> Shutdown are accepted.
    fn transition(
        env: Env,
        sender: Address,
        target: PowerSwitchStatus,
    ) -> Result<PowerSwitchStatus, ContractError>;

    fn power_on(env: Env, sender: Address) -> Result<PowerSwitchStatus, ContractError>;

    fn power_off(env: Env, sender: Address) -> Result<PowerSwitchStatus, ContractError>;

    fn emergency_shutdown(env: Env, sender: Address) -> Result<PowerSwitchStatus, ContractError>;

    fn transfer_ownership(
        env: Env,
        sender: Address,
        new_owner: Address,
    ) -> Result<Address, ContractError>;

    // QUERIES

    fn query_status(env: Env) -> PowerSwitchStatus;

    fn query_owner(env: Env) -> Address;

    fn query_is_online(env: Env) -> bool;

    fn query_is_offline(env: Env) -> bool;

    fn query_is_shutdown(env: Env) -> bool;
}

#[contractimpl]
impl PowerSwitch {
    pub fn __constructor(env: Env, owner: Address) {
        save_owner(&env, &owner);
        save_status(&env, &PowerSwitchStatus::Online);

        env.events().publish(("initialize", "power_switch"), owner);
    }
}

#[contractimpl]
impl PowerSwitchTrait for PowerSwitch {
    fn transition(
        env: Env,
        sender: Address,
        target: PowerSwitchStatus,
    ) -> Result<PowerSwitchStatus, ContractError> {
        sender.require_auth();
        ensure_owner(&env, &sender)?;

        let current = get_status(&env);
        if !current.can_transition_to(&target) {
            log!(
                &env,
                "PowerSwitch: Transition: invalid transition",
                current,
                target
            );
            return Err(ContractError::InvalidTransition);
        }

        save_status(&env, &target);

        env.events().publish(
            (Symbol::new(&env, "transition"), sender),
            (current, target),
        );

        Ok(target)
    }

    fn power_on(env: Env, sender: Address) -> Result<PowerSwitchStatus, ContractError> {
        Self::transition(env, sender, PowerSwitchStatus::Online)
    }

    fn power_off(env: Env, sender: Address) -> Result<PowerSwitchStatus, ContractError> {
        Self::transition(env, sender, PowerSwitchStatus::Offline)
    }

    fn emergency_shutdown(env: Env, sender: Address) -> Result<PowerSwitchStatus, ContractError> {
        Self::transition(env, sender, PowerSwitchStatus::Shutdown)
    }

    fn transfer_ownership(
        env: Env,
        sender: Address,
        new_owner: Address,
    ) -> Result<Address, ContractError> {
        sender.require_auth();
        ensure_owner(&env, &sender)?;

        if sender == new_owner {
            log!(&env, "PowerSwitch: Transfer ownership: new owner is the current one");
            return Err(ContractError::SameOwner);
        }

        save_owner(&env, &new_owner);

        env.events()
            .publish(("transfer_ownership", "new_owner"), &new_owner);

        Ok(new_owner)
    }

    fn query_status(env: Env) -> PowerSwitchStatus {
        get_status(&env)
    }

    fn query_owner(env: Env) -> Address {
        get_owner(&env)
    }

    fn query_is_online(env: Env) -> bool {
        get_status(&env) == PowerSwitchStatus::Online
    }

    fn query_is_offline(env: Env) -> bool {
        get_status(&env) == PowerSwitchStatus::Offline
    }

    fn query_is_shutdown(env: Env) -> bool {
        get_status(&env).is_shutdown()
    }
}

fn ensure_owner(env: &Env, sender: &Address) -> Result<(), ContractError> {
    if *sender != get_owner(env) {
        log!(env, "PowerSwitch: caller is not the power controller");
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
