#![no_main]

use apy_staking::{ApyStakingContract, ApyStakingContractClient};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

const UNIT: i128 = 10_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { staker: u8, amount: u64 },
    Withdraw { staker: u8, amount: u64 },
    ClaimRewards { staker: u8 },
    Wait { seconds: u32 },
    SetEndDate { offset: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(ApyStakingContract, ());
    let client = ApyStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &(1_000 * UNIT), &(100 * UNIT), &100u32);
    StellarAssetClient::new(&env, &token).mint(&contract_id, &(5_000 * UNIT));

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &(10_000 * UNIT));
        TokenClient::new(&env, &token).approve(&user, &contract_id, &(10_000 * UNIT), &1_000);
        users.push(user);
    }

    // Any call may be rejected; the ledger must stay consistent regardless.
    for action in actions {
        match action {
            FuzzAction::Deposit { staker, amount } => {
                let user = &users[staker as usize % users.len()];
                let _ = client.try_deposit(user, &(amount as i128));
            }
            FuzzAction::Withdraw { staker, amount } => {
                let user = &users[staker as usize % users.len()];
                let _ = client.try_withdraw(user, &(amount as i128));
            }
            FuzzAction::ClaimRewards { staker } => {
                let user = &users[staker as usize % users.len()];
                let _ = client.try_claim_rewards(user);
            }
            FuzzAction::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
            FuzzAction::SetEndDate { offset } => {
                let now = env.ledger().timestamp();
                let _ = client.try_set_end_date(&admin, &now.saturating_add(offset as u64));
            }
        }

        let total = client.total_deposited();
        let balances: i128 = users.iter().map(|u| client.balances_by_user(u)).sum();
        assert_eq!(total, balances);
        assert!(total <= 1_000 * UNIT);

        let owed: i128 = users.iter().map(|u| client.calculate_rewards(u)).sum();
        assert!(owed <= client.get_committed_rewards());
    }
});
