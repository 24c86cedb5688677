use soroban_sdk::{log, Address, Env};

use crate::{
    error::ContractError,
    storage::{get_vault_factories, Config},
};

/// Capability a call must hold, checked explicitly at the top of each entrypoint.
pub enum Role {
    /// The geyser owner, authorized by signature
    Controller(Address),
    /// The account whose stake is moved, authorized by signature
    VaultOwner(Address),
    /// A vault ledger registered through `register_vault_factory`
    RegisteredVault(Address),
}

impl Role {
    pub fn require(&self, env: &Env, config: &Config) -> Result<(), ContractError> {
        match self {
            Role::Controller(sender) => {
                sender.require_auth();
                if *sender != config.owner {
                    log!(env, "Geyser: Unauthorized, sender is not the owner");
                    return Err(ContractError::Unauthorized);
                }
            }
            Role::VaultOwner(owner) => owner.require_auth(),
            Role::RegisteredVault(vault) => {
                if !get_vault_factories(env).contains(vault) {
                    log!(env, "Geyser: Unauthorized, vault ledger is not registered");
                    return Err(ContractError::Unauthorized);
                }
            }
        }
        Ok(())
    }
}
