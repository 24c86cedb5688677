use geyser::{ensure_positive, Lock};
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env, Vec};

use crate::{
    error::ContractError,
    guard::with_reentrancy_guard,
    storage::{
        available_balance, get_balance, get_locks, get_token, save_balance, save_locks,
        save_token, total_locked,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Geyser vault ledger holding staked tokens on behalf of their owners"
);

#[contract]
pub struct Vault;

pub trait VaultTrait {
    fn deposit(env: Env, owner: Address, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, owner: Address, amount: i128) -> Result<(), ContractError>;

    /// Commits `amount` of the owner's uncommitted custody to `geyser`.
    fn lock(env: Env, geyser: Address, owner: Address, amount: i128) -> Result<(), ContractError>;

    /// Releases `amount` of the lock `geyser` holds against the owner.
    fn unlock(
        env: Env,
        geyser: Address,
        owner: Address,
        amount: i128,
    ) -> Result<(), ContractError>;

    // QUERIES

    fn query_token(env: Env) -> Address;

    fn query_balance(env: Env, owner: Address) -> i128;

    fn query_locked(env: Env, owner: Address) -> Result<i128, ContractError>;

    fn query_available(env: Env, owner: Address) -> Result<i128, ContractError>;

    fn query_locks(env: Env, owner: Address) -> Vec<Lock>;

    fn query_lock(env: Env, owner: Address, geyser: Address) -> Option<Lock>;
}

#[contractimpl]
impl Vault {
    pub fn __constructor(env: Env, token: Address) {
        save_token(&env, &token);

        env.events().publish(("initialize", "vault_token"), token);
    }
}

#[contractimpl]
impl VaultTrait for Vault {
    fn deposit(env: Env, owner: Address, amount: i128) -> Result<(), ContractError> {
        owner.require_auth();
        ensure_positive!(ContractError::InvalidAmount, amount);

        with_reentrancy_guard(&env, &owner, || {
            let balance = get_balance(&env, &owner)
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticError)?;
            save_balance(&env, &owner, balance);

            token::Client::new(&env, &get_token(&env)).transfer(
                &owner,
                &env.current_contract_address(),
                &amount,
            );
            Ok(())
        })?;

        env.events().publish(("deposit", owner), amount);

        Ok(())
    }

    fn withdraw(env: Env, owner: Address, amount: i128) -> Result<(), ContractError> {
        owner.require_auth();
        ensure_positive!(ContractError::InvalidAmount, amount);

        with_reentrancy_guard(&env, &owner, || {
            let available = available_balance(&env, &owner)?;
            if amount > available {
                log!(
                    &env,
                    "Vault: Withdraw: requested more than the uncommitted balance",
                    amount,
                    available
                );
                return Err(ContractError::InsufficientBalance);
            }

            let balance = get_balance(&env, &owner)
                .checked_sub(amount)
                .ok_or(ContractError::ArithmeticError)?;
            save_balance(&env, &owner, balance);

            token::Client::new(&env, &get_token(&env)).transfer(
                &env.current_contract_address(),
                &owner,
                &amount,
            );
            Ok(())
        })?;

        env.events().publish(("withdraw", owner), amount);

        Ok(())
    }

    fn lock(env: Env, geyser: Address, owner: Address, amount: i128) -> Result<(), ContractError> {
        geyser.require_auth();
        owner.require_auth();
        ensure_positive!(ContractError::InvalidAmount, amount);

        with_reentrancy_guard(&env, &owner, || {
            let available = available_balance(&env, &owner)?;
            if amount > available {
                log!(
                    &env,
                    "Vault: Lock: not enough uncommitted balance",
                    amount,
                    available
                );
                return Err(ContractError::InsufficientBalance);
            }

            let now = env.ledger().timestamp();
            let mut locks = get_locks(&env, &owner);
            match locks.iter().position(|lock| lock.geyser == geyser) {
                Some(index) => {
                    let mut lock = locks
                        .get(index as u32)
                        .ok_or(ContractError::LockNotFound)?;
                    lock.amount = lock
                        .amount
                        .checked_add(amount)
                        .ok_or(ContractError::ArithmeticError)?;
                    lock.lock_timestamp = now;
                    locks.set(index as u32, lock);
                }
                None => locks.push_back(Lock {
                    geyser: geyser.clone(),
                    amount,
                    lock_timestamp: now,
                }),
            }
            save_locks(&env, &owner, &locks);
            Ok(())
        })?;

        env.events().publish(("lock", owner, geyser), amount);

        Ok(())
    }

    fn unlock(
        env: Env,
        geyser: Address,
        owner: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        geyser.require_auth();
        ensure_positive!(ContractError::InvalidAmount, amount);

        with_reentrancy_guard(&env, &owner, || {
            let mut locks = get_locks(&env, &owner);
            let index = locks
                .iter()
                .position(|lock| lock.geyser == geyser)
                .ok_or_else(|| {
                    log!(&env, "Vault: Unlock: caller holds no lock for owner", geyser);
                    ContractError::LockNotFound
                })? as u32;

            let mut lock = locks.get(index).ok_or(ContractError::LockNotFound)?;
            if amount > lock.amount {
                log!(
                    &env,
                    "Vault: Unlock: amount exceeds the lock",
                    amount,
                    lock.amount
                );
                return Err(ContractError::InsufficientBalance);
            }

            lock.amount -= amount;
            if lock.amount == 0 {
                locks.remove(index);
            } else {
                locks.set(index, lock);
            }
            save_locks(&env, &owner, &locks);
            Ok(())
        })?;

        env.events().publish(("unlock", owner, geyser), amount);

        Ok(())
    }

    fn query_token(env: Env) -> Address {
        get_token(&env)
    }

    fn query_balance(env: Env, owner: Address) -> i128 {
        get_balance(&env, &owner)
    }

    fn query_locked(env: Env, owner: Address) -> Result<i128, ContractError> {
        total_locked(&get_locks(&env, &owner))
    }

    fn query_available(env: Env, owner: Address) -> Result<i128, ContractError> {
        available_balance(&env, &owner)
    }

    fn query_locks(env: Env, owner: Address) -> Vec<Lock> {
        get_locks(&env, &owner)
    }

    fn query_lock(env: Env, owner: Address, geyser: Address) -> Option<Lock> {
        get_locks(&env, &owner)
            .iter()
            .find(|lock| lock.geyser == geyser)
    }
}
