#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub max_balance: i128,
    pub min_deposit: i128,
    pub apy: u32,
    pub end_date: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub new_total_deposited: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws from their pooled claim.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub principal: i128,
    pub rewards: i128,
    pub new_total_deposited: i128,
    pub timestamp: u64,
}

/// Fired when a user claims accrued rewards only.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin moves the end date.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndDateSetEvent {
    pub previous_end_date: u64,
    pub new_end_date: u64,
    /// Set when accrual had already stopped and resumes from `timestamp`.
    pub resumed: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    max_balance: i128,
    min_deposit: i128,
    apy: u32,
    end_date: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            max_balance,
            min_deposit,
            apy,
            end_date,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    staker: Address,
    amount: i128,
    new_balance: i128,
    new_total_deposited: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        DepositedEvent {
            staker,
            amount,
            new_balance,
            new_total_deposited,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    principal: i128,
    rewards: i128,
    new_total_deposited: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), staker.clone()),
        WithdrawnEvent {
            staker,
            principal,
            rewards,
            new_total_deposited,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_end_date_set(env: &Env, previous_end_date: u64, new_end_date: u64, resumed: bool) {
    env.events().publish(
        (symbol_short!("END_DATE"),),
        EndDateSetEvent {
            previous_end_date,
            new_end_date,
            resumed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
