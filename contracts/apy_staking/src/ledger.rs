use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER_STAKE: Symbol = symbol_short!("STK");

/// A staker's position as of its last checkpoint.
///
/// Records are created on first deposit and never removed; a fully withdrawn
/// staker keeps a zero-balance record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    /// Principal currently staked.
    pub balance: i128,
    /// Rewards locked in at `last_update` and not yet paid out.
    pub accrued_rewards: i128,
    /// Timestamp of the last checkpoint, never past the end date.
    pub last_update: u64,
}

impl StakeRecord {
    pub fn opened_at(timestamp: u64) -> Self {
        StakeRecord {
            balance: 0,
            accrued_rewards: 0,
            last_update: timestamp,
        }
    }

    /// Principal plus locked-in rewards.
    pub fn claim(&self) -> Option<i128> {
        self.balance.checked_add(self.accrued_rewards)
    }
}

pub fn get_record(env: &Env, staker: &Address) -> Option<StakeRecord> {
    env.storage()
        .persistent()
        .get(&(USER_STAKE, staker.clone()))
}

pub fn has_record(env: &Env, staker: &Address) -> bool {
    env.storage().persistent().has(&(USER_STAKE, staker.clone()))
}

pub fn store_record(env: &Env, staker: &Address, record: &StakeRecord) {
    env.storage()
        .persistent()
        .set(&(USER_STAKE, staker.clone()), record);
}
