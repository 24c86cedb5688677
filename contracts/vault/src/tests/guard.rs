use soroban_sdk::{testutils::Address as _, Address};

use crate::{error::ContractError, guard::with_reentrancy_guard};

use super::setup::setup_vault;

#[test]
fn nested_entry_for_same_owner_is_rejected() {
    let t = setup_vault(0);
    let env = &t.env;

    let result = env.as_contract(&t.vault.address, || {
        with_reentrancy_guard(env, &t.owner, || {
            with_reentrancy_guard(env, &t.owner, || Ok(()))
        })
    });

    assert_eq!(result, Err(ContractError::ReentrancyError));
}

#[test]
fn other_owners_are_not_blocked() {
    let t = setup_vault(0);
    let env = &t.env;
    let other = Address::generate(env);

    let result = env.as_contract(&t.vault.address, || {
        with_reentrancy_guard(env, &t.owner, || {
            with_reentrancy_guard(env, &other, || Ok(7u32))
        })
    });

    assert_eq!(result, Ok(7));
}

#[test]
fn guard_is_released_after_failure() {
    let t = setup_vault(0);
    let env = &t.env;

    env.as_contract(&t.vault.address, || {
        let failed: Result<(), ContractError> = with_reentrancy_guard(env, &t.owner, || {
            Err(ContractError::InsufficientBalance)
        });
        assert_eq!(failed, Err(ContractError::InsufficientBalance));

        let retried = with_reentrancy_guard(env, &t.owner, || Ok(()));
        assert_eq!(retried, Ok(()));
    });
}
