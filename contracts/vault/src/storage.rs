use geyser::{
    ttl::{extend_instance, extend_persistent},
    Lock,
};
use soroban_sdk::{contracttype, log, panic_with_error, vec, Address, Env, Vec};

use crate::error::ContractError;

#[derive(Clone)]
#[contracttype]
pub enum VaultDataKey {
    Token,
    Balance(Address),
    Locks(Address),
    Entered(Address),
}

pub fn save_token(env: &Env, token: &Address) {
    env.storage().instance().set(&VaultDataKey::Token, token);
    extend_instance(env);
}

pub fn get_token(env: &Env) -> Address {
    extend_instance(env);
    env.storage()
        .instance()
        .get(&VaultDataKey::Token)
        .unwrap_or_else(|| {
            log!(env, "Vault: Custody token not set");
            panic_with_error!(env, ContractError::TokenNotSet)
        })
}

pub fn get_balance(env: &Env, owner: &Address) -> i128 {
    let key = VaultDataKey::Balance(owner.clone());
    extend_persistent(env, &key);
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn save_balance(env: &Env, owner: &Address, balance: i128) {
    let key = VaultDataKey::Balance(owner.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &balance);
    extend_persistent(env, &key);
}

pub fn get_locks(env: &Env, owner: &Address) -> Vec<Lock> {
    let key = VaultDataKey::Locks(owner.clone());
    extend_persistent(env, &key);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| vec![env])
}

pub fn save_locks(env: &Env, owner: &Address, locks: &Vec<Lock>) {
    let key = VaultDataKey::Locks(owner.clone());
    if locks.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, locks);
    extend_persistent(env, &key);
}

/// Sum of all locks held against the owner's custody.
pub fn total_locked(locks: &Vec<Lock>) -> Result<i128, ContractError> {
    locks.iter().try_fold(0i128, |acc, lock| {
        acc.checked_add(lock.amount)
            .ok_or(ContractError::ArithmeticError)
    })
}

/// Custody not committed to any geyser.
pub fn available_balance(env: &Env, owner: &Address) -> Result<i128, ContractError> {
    let locked = total_locked(&get_locks(env, owner))?;
    get_balance(env, owner)
        .checked_sub(locked)
        .ok_or(ContractError::ArithmeticError)
}
