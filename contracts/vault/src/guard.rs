use soroban_sdk::{log, Address, Env};

use crate::{error::ContractError, storage::VaultDataKey};

/// Runs `f` while holding the owner's reentrancy flag.
///
/// The flag is cleared whether `f` succeeds or fails; a nested acquisition for the
/// same owner fails with `ReentrancyError` and leaves the outer holder untouched.
pub fn with_reentrancy_guard<T, F>(env: &Env, owner: &Address, f: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    let key = VaultDataKey::Entered(owner.clone());
    if env.storage().temporary().has(&key) {
        log!(env, "Vault: nested call rejected for owner", owner);
        return Err(ContractError::ReentrancyError);
    }
    env.storage().temporary().set(&key, &true);

    let result = f();

    env.storage().temporary().remove(&key);
    result
}
