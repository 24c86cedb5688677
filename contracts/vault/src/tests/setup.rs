use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use crate::contract::{Vault, VaultClient};

pub fn deploy_token_contract<'a>(env: &Env, admin: &Address) -> TokenClient<'a> {
    TokenClient::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone())
            .address(),
    )
}

pub fn mint(env: &Env, token: &TokenClient, to: &Address, amount: i128) {
    StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

pub struct VaultTest<'a> {
    pub env: Env,
    pub token: TokenClient<'a>,
    pub vault: VaultClient<'a>,
    pub owner: Address,
    pub geyser: Address,
}

/// Vault over a fresh token with `owner` holding `balance` tokens outside of custody.
pub fn setup_vault<'a>(balance: i128) -> VaultTest<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let owner = Address::generate(&env);
    let geyser = Address::generate(&env);

    let token = deploy_token_contract(&env, &admin);
    let vault = VaultClient::new(&env, &env.register(Vault, (token.address.clone(),)));
    if balance > 0 {
        mint(&env, &token, &owner, balance);
    }

    VaultTest {
        env,
        token,
        vault,
        owner,
        geyser,
    }
}
