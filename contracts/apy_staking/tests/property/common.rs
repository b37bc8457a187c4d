#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Shared fixtures for the property suites.

use apy_staking::{ApyStakingContract, ApyStakingContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

pub const UNIT: i128 = 10_000_000;
pub const START: u64 = 1_700_000_000;

pub struct Fixture {
    pub env: Env,
    pub client: ApyStakingContractClient<'static>,
    pub admin: Address,
    pub token: Address,
    pub contract: Address,
}

pub fn setup(max_balance: i128, min_deposit: i128, apy: u32, reserve: i128) -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract = env.register(ApyStakingContract, ());
    let client = ApyStakingContractClient::new(&env, &contract);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token, &max_balance, &min_deposit, &apy);
    StellarAssetClient::new(&env, &token).mint(&contract, &reserve);

    Fixture {
        env,
        client,
        admin,
        token,
        contract,
    }
}

/// Mint `amount` to a fresh staker and approve the ledger for all of it.
pub fn new_staker(f: &Fixture, amount: i128) -> Address {
    let staker = Address::generate(&f.env);
    StellarAssetClient::new(&f.env, &f.token).mint(&staker, &amount);
    TokenClient::new(&f.env, &f.token).approve(&staker, &f.contract, &amount, &1_000);
    staker
}

pub fn token_balance(f: &Fixture, who: &Address) -> i128 {
    TokenClient::new(&f.env, &f.token).balance(who)
}

pub fn advance(f: &Fixture, seconds: u64) {
    let now = f.env.ledger().timestamp();
    f.env.ledger().set_timestamp(now + seconds);
}
