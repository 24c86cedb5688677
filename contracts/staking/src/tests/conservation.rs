use soroban_sdk::Address;
use test_case::test_case;

use super::setup::{jump_to, scaling, setup_geyser, GeyserTest};
use crate::storage::{RewardScaling, UnstakeOrder};

fn assert_conserved(t: &GeyserTest, funded: i128, paid: i128) {
    let data = t.geyser.query_geyser_data();
    assert_eq!(paid + data.reward_pool_balance, funded);
    assert_eq!(
        t.reward_token.balance(&t.geyser.address),
        data.reward_pool_balance
    );
    assert!(data.available_reward >= 0);
    assert!(data.available_reward <= data.reward_pool_balance);
    assert!(data.total_stake >= 0);
    assert!(data.total_stake_units >= 0);
}

#[test_case(scaling(0, 10_000, 300), UnstakeOrder::Fifo ; "zero floor fifo")]
#[test_case(scaling(3_333, 7_777, 97), UnstakeOrder::Lifo ; "odd fractions lifo")]
#[test_case(scaling(10_000, 10_000, 1), UnstakeOrder::Fifo ; "flat")]
fn rewards_are_never_created_or_destroyed(scaling: RewardScaling, order: UnstakeOrder) {
    let t = setup_geyser(scaling, order);
    let stakers: [Address; 3] = [t.staker(10_000), t.staker(10_000), t.staker(10_000)];

    let mut funded = 0i128;
    let mut paid = 0i128;
    let mut staked = [0i128; 3];
    let mut now = 0u64;

    for step in 0..40u64 {
        now += 7 + (step * 13) % 29;
        jump_to(&t.env, now);
        let who = (step % 3) as usize;

        match step % 5 {
            0 => {
                let amount = 1_000 + (step as i128) * 37;
                t.fund(amount, 50 + step * 11);
                funded += amount;
            }
            1 | 2 => {
                let amount = 17 + (step as i128 * 53) % 400;
                t.stake(&stakers[who], amount);
                staked[who] += amount;
            }
            _ => {
                if staked[who] > 0 {
                    let amount = (staked[who] / 2).max(1);
                    let response =
                        t.geyser
                            .unstake(&t.vault.address, &stakers[who], &amount, &stakers[who]);
                    staked[who] -= amount;
                    paid += response.reward;
                }
            }
        }
        assert_conserved(&t, funded, paid);
    }

    // draining every position never overpays
    now += 1_000;
    jump_to(&t.env, now);
    for (who, staker) in stakers.iter().enumerate() {
        if staked[who] > 0 {
            paid += t
                .geyser
                .unstake(&t.vault.address, staker, &staked[who], staker)
                .reward;
        }
    }
    assert_conserved(&t, funded, paid);
    assert_eq!(t.geyser.query_geyser_data().total_stake, 0);
    assert_eq!(t.geyser.query_geyser_data().total_stake_units, 0);
}

#[test]
fn emergency_withdraw_keeps_the_pool_whole() {
    let t = setup_geyser(scaling(0, 10_000, 100), UnstakeOrder::Fifo);
    t.fund(900, 90);
    let alice = t.staker(500);
    let bob = t.staker(500);
    t.stake(&alice, 300);
    t.stake(&bob, 200);

    jump_to(&t.env, 30);
    let partial = t.geyser.unstake(&t.vault.address, &bob, &50, &bob);
    t.power_switch.emergency_shutdown(&t.owner);
    jump_to(&t.env, 60);
    t.geyser.emergency_withdraw(&t.vault.address, &alice);
    t.geyser.emergency_withdraw(&t.vault.address, &bob);

    assert_conserved(&t, 900, partial.reward);
    assert_eq!(t.vault.query_available(&alice), 500);
    assert_eq!(t.vault.query_available(&bob), 500);
}
