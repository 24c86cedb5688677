use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, vec, Address};

use super::setup::{deploy_token_contract, flat_scaling, jump_to, mint, scaling, setup_geyser};
use crate::{msg::TokenBalance, storage::UnstakeOrder};

#[test]
fn geyser_data_reflects_current_state() {
    let t = setup_geyser(scaling(5_000, 10_000, 100), UnstakeOrder::Fifo);
    let admin = Address::generate(&t.env);
    let bonus = deploy_token_contract(&t.env, &admin);
    t.geyser.register_bonus_token(&t.owner, &bonus.address);
    mint(&t.env, &bonus, &t.geyser.address, 42);

    t.fund(1_000, 100);
    let staker = t.staker(100);
    t.stake(&staker, 100);
    jump_to(&t.env, 40);

    let data = t.geyser.query_geyser_data();
    assert_eq!(data.owner, t.owner);
    assert_eq!(data.staking_token, t.staking_token.address);
    assert_eq!(data.reward_token, t.reward_token.address);
    assert_eq!(data.total_stake, 100);
    // units and last update both describe the pool at the query time
    assert_eq!(data.total_stake_units, 4_000);
    assert_eq!(data.last_update, 40);
    assert_eq!(data.scaling, scaling(5_000, 10_000, 100));
    assert_eq!(data.unlocked_reward, 400);
    assert_eq!(data.available_reward, 400);
    assert_eq!(data.reward_pool_balance, 1_000);
    assert_eq!(
        data.reward_pool_balances,
        vec![
            &t.env,
            TokenBalance {
                token: t.reward_token.address.clone(),
                balance: 1_000,
            },
            TokenBalance {
                token: bonus.address.clone(),
                balance: 42,
            }
        ]
    );

    jump_to(&t.env, 65);
    let later = t.geyser.query_geyser_data();
    assert_eq!(later.last_update, 65);
    assert_eq!(
        later.total_stake_units,
        later.total_stake * i128::from(later.last_update)
    );
}

#[test]
fn unlocked_reward_queries() {
    let t = setup_geyser(flat_scaling(), UnstakeOrder::Fifo);
    t.fund(1_000, 100);
    let staker = t.staker(100);
    t.stake(&staker, 100);

    jump_to(&t.env, 20);
    assert_eq!(t.geyser.query_current_unlocked_rewards(), 200);
    assert_eq!(t.geyser.query_future_unlocked_rewards(&60), 600);
    assert_eq!(t.geyser.query_future_unlocked_rewards(&500), 1_000);
    // past timestamps report the current amount
    assert_eq!(t.geyser.query_future_unlocked_rewards(&10), 200);

    t.geyser.unstake(&t.vault.address, &staker, &50, &staker);
    assert_eq!(t.geyser.query_current_unlocked_rewards(), 100);
}

#[test]
fn vault_reward_preview_matches_unstake() {
    let t = setup_geyser(scaling(2_000, 10_000, 1_000), UnstakeOrder::Fifo);
    t.fund(5_000, 500);
    let alice = t.staker(300);
    let bob = t.staker(100);
    t.stake(&alice, 100);
    jump_to(&t.env, 50);
    t.stake(&bob, 100);
    jump_to(&t.env, 120);
    t.stake(&alice, 200);
    jump_to(&t.env, 400);

    let preview = t.geyser.query_current_vault_reward(&t.vault.address, &alice);
    let before = t.geyser.query_geyser_data();
    // previewing leaves state untouched
    assert_eq!(
        t.geyser.query_current_vault_reward(&t.vault.address, &alice),
        preview
    );
    assert_eq!(t.geyser.query_geyser_data(), before);

    let response = t.geyser.unstake(&t.vault.address, &alice, &300, &alice);
    assert_eq!(response.reward, preview);
    assert!(preview > 0);
}

#[test]
fn vault_reward_preview_without_stake_is_zero() {
    let t = setup_geyser(flat_scaling(), UnstakeOrder::Fifo);
    t.fund(1_000, 100);
    let nobody = Address::generate(&t.env);
    jump_to(&t.env, 50);

    assert_eq!(
        t.geyser.query_current_vault_reward(&t.vault.address, &nobody),
        0
    );
}
