use geyser::PowerSwitchStatus;
use soroban_sdk::{testutils::Address as _, Address, Env};
use test_case::test_case;

use super::setup::deploy_power_switch;
use crate::{contract::PowerSwitchClient, error::ContractError};

#[test]
fn starts_online_with_owner() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let switch = deploy_power_switch(&env, &owner);

    assert_eq!(switch.query_status(), PowerSwitchStatus::Online);
    assert_eq!(switch.query_owner(), owner);
    assert!(switch.query_is_online());
    assert!(!switch.query_is_offline());
    assert!(!switch.query_is_shutdown());
}

#[test]
fn owner_toggles_between_online_and_offline() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let switch = deploy_power_switch(&env, &owner);

    assert_eq!(switch.power_off(&owner), PowerSwitchStatus::Offline);
    assert!(switch.query_is_offline());

    assert_eq!(switch.power_on(&owner), PowerSwitchStatus::Online);
    assert!(switch.query_is_online());

    assert_eq!(
        switch.transition(&owner, &PowerSwitchStatus::Offline),
        PowerSwitchStatus::Offline
    );
}

fn switch_in<'a>(env: &Env, owner: &Address, status: PowerSwitchStatus) -> PowerSwitchClient<'a> {
    let switch = deploy_power_switch(env, owner);
    match status {
        PowerSwitchStatus::Online => {}
        PowerSwitchStatus::Offline => {
            switch.power_off(owner);
        }
        PowerSwitchStatus::Shutdown => {
            switch.emergency_shutdown(owner);
        }
    }
    assert_eq!(switch.query_status(), status);
    switch
}

#[test_case(PowerSwitchStatus::Online, PowerSwitchStatus::Online, false ; "online to online")]
#[test_case(PowerSwitchStatus::Online, PowerSwitchStatus::Offline, true ; "online to offline")]
#[test_case(PowerSwitchStatus::Online, PowerSwitchStatus::Shutdown, true ; "online to shutdown")]
#[test_case(PowerSwitchStatus::Offline, PowerSwitchStatus::Online, true ; "offline to online")]
#[test_case(PowerSwitchStatus::Offline, PowerSwitchStatus::Offline, false ; "offline to offline")]
#[test_case(PowerSwitchStatus::Offline, PowerSwitchStatus::Shutdown, true ; "offline to shutdown")]
#[test_case(PowerSwitchStatus::Shutdown, PowerSwitchStatus::Online, false ; "shutdown to online")]
#[test_case(PowerSwitchStatus::Shutdown, PowerSwitchStatus::Offline, false ; "shutdown to offline")]
#[test_case(PowerSwitchStatus::Shutdown, PowerSwitchStatus::Shutdown, false ; "shutdown to shutdown")]
fn transition_follows_the_status_graph(
    from: PowerSwitchStatus,
    target: PowerSwitchStatus,
    allowed: bool,
) {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let switch = switch_in(&env, &owner, from);

    if allowed {
        assert_eq!(switch.transition(&owner, &target), target);
        assert_eq!(switch.query_status(), target);
    } else {
        assert_eq!(
            switch.try_transition(&owner, &target),
            Err(Ok(ContractError::InvalidTransition))
        );
        assert_eq!(switch.query_status(), from);
    }
}

#[test_case(PowerSwitchStatus::Online, Ok(PowerSwitchStatus::Shutdown) ; "from online")]
#[test_case(PowerSwitchStatus::Offline, Ok(PowerSwitchStatus::Shutdown) ; "from offline")]
#[test_case(PowerSwitchStatus::Shutdown, Err(ContractError::InvalidTransition) ; "already shut down")]
fn emergency_shutdown_from(
    from: PowerSwitchStatus,
    expected: Result<PowerSwitchStatus, ContractError>,
) {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let switch = switch_in(&env, &owner, from);

    match expected {
        Ok(status) => assert_eq!(switch.emergency_shutdown(&owner), status),
        Err(error) => assert_eq!(switch.try_emergency_shutdown(&owner), Err(Ok(error))),
    }
    assert!(switch.query_is_shutdown());
}

#[test]
fn only_owner_can_transition() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let stranger = Address::generate(&env);
    let switch = deploy_power_switch(&env, &owner);

    assert_eq!(
        switch.try_power_off(&stranger),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        switch.try_emergency_shutdown(&stranger),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(switch.query_status(), PowerSwitchStatus::Online);
}

#[test]
fn transfer_ownership_moves_control() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let new_owner = Address::generate(&env);
    let switch = deploy_power_switch(&env, &owner);

    assert_eq!(switch.transfer_ownership(&owner, &new_owner), new_owner);
    assert_eq!(switch.query_owner(), new_owner);

    assert_eq!(
        switch.try_power_off(&owner),
        Err(Ok(ContractError::Unauthorized))
    );
    switch.power_off(&new_owner);
    assert!(switch.query_is_offline());
}

#[test]
fn transfer_ownership_checks() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let stranger = Address::generate(&env);
    let switch = deploy_power_switch(&env, &owner);

    assert_eq!(
        switch.try_transfer_ownership(&stranger, &stranger),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        switch.try_transfer_ownership(&owner, &owner),
        Err(Ok(ContractError::SameOwner))
    );
}
