use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::rewards::SECONDS_PER_YEAR;

const END_DATE: Symbol = symbol_short!("END_DATE");
const PAUSES: Symbol = symbol_short!("PAUSES");

/// End date assigned at initialization, relative to the ledger time.
pub const DEFAULT_STAKING_PERIOD: u64 = 10 * SECONDS_PER_YEAR;

/// A window during which nothing accrued: the end date had passed and was
/// later moved into the future again.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccrualPause {
    pub start: u64,
    pub end: u64,
}

pub fn end_date(env: &Env) -> u64 {
    env.storage().instance().get(&END_DATE).unwrap_or(0)
}

pub fn init_end_date(env: &Env, end_date: u64) {
    env.storage().instance().set(&END_DATE, &end_date);
}

/// The latest instant rewards may accrue to, given the current ledger time.
pub fn accrual_cutoff(env: &Env, now: u64) -> u64 {
    now.min(end_date(env))
}

pub fn pauses(env: &Env) -> Vec<AccrualPause> {
    env.storage()
        .instance()
        .get(&PAUSES)
        .unwrap_or_else(|| Vec::new(env))
}

/// Overwrite the end date.
///
/// When the previous end date is already behind `now`, the interval between
/// the two is recorded as a pause so stakers who have not checkpointed since
/// do not earn for it. Returns the recorded pause, if any.
pub fn replace_end_date(env: &Env, new_end_date: u64, now: u64) -> Option<AccrualPause> {
    let previous = end_date(env);
    let mut recorded = None;

    if now > previous {
        let pause = AccrualPause {
            start: previous,
            end: now,
        };
        let mut all = pauses(env);
        all.push_back(pause.clone());
        env.storage().instance().set(&PAUSES, &all);
        recorded = Some(pause);
    }

    env.storage().instance().set(&END_DATE, &new_end_date);
    recorded
}
