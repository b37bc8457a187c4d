#![no_std]

pub mod events;
pub mod ledger;
pub mod rewards;
pub mod schedule;

use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol,
};

pub use ledger::StakeRecord;
pub use schedule::{AccrualPause, DEFAULT_STAKING_PERIOD};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_DEPOSITED: Symbol = symbol_short!("TOT_DEP");
const COMMITTED: Symbol = symbol_short!("COMMITTED");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InvalidTokenAddress = 5,
    BelowMinimumDeposit = 6,
    DepositsClosed = 7,
    MaxDepositsReached = 8,
    InsufficientRewardReserve = 9,
    WithdrawExceedsClaim = 10,
    StakeNotFound = 11,
    EndDateNotInFuture = 12,
    ArithmeticOverflow = 13,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Parameters fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeConfig {
    /// Token accepted for deposits and paid out as rewards.
    pub token: Address,
    /// Ceiling on `total_deposited`.
    pub max_balance: i128,
    /// Smallest amount a single `deposit` may carry.
    pub min_deposit: i128,
    /// Annual percentage rate in whole percent.
    pub apy: u32,
}

/// Snapshot of a user's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct StakerInfo {
    pub balance: i128,
    pub rewards: i128,
    pub last_update: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ApyStakingContract;

#[contractimpl]
impl ApyStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `token`       – SAC address of the staked (and rewarded) token.
    /// * `max_balance` – cap on the sum of all stakers' principal.
    /// * `min_deposit` – minimum amount per deposit.
    /// * `apy`         – annual percentage rate, 100 = 100%.
    ///
    /// The end date starts at `now + DEFAULT_STAKING_PERIOD`.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        max_balance: i128,
        min_deposit: i128,
        apy: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if token == env.current_contract_address() {
            return Err(ContractError::InvalidTokenAddress);
        }
        if min_deposit <= 0 || max_balance < min_deposit {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let end_date = now.saturating_add(DEFAULT_STAKING_PERIOD);

        let config = StakeConfig {
            token: token.clone(),
            max_balance,
            min_deposit,
            apy,
        };

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&CONFIG, &config);
        // TOTAL_DEPOSITED and COMMITTED start at zero; unwrap_or(0) covers
        // the absent keys.
        schedule::init_end_date(&env, end_date);

        events::publish_initialized(&env, admin, token, max_balance, min_deposit, apy, end_date);

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Stake `amount` tokens.
    ///
    /// The caller's pending rewards are checkpointed before the balance
    /// changes so new principal never earns for time already elapsed. The
    /// ledger must have approval to pull `amount` from `staker`.
    ///
    /// Admission reserves the deposit's full accrual to the end date, and a
    /// later principal withdrawal does not release it. Depositing and
    /// withdrawing at once therefore costs the caller nothing but holds that
    /// reserve until it is topped up, which can lock out other depositors.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let config = Self::load_config(&env)?;
        if amount < config.min_deposit {
            return Err(ContractError::BelowMinimumDeposit);
        }

        let now = env.ledger().timestamp();
        let end_date = schedule::end_date(&env);
        if now > end_date {
            log!(&env, "deposit after end date", staker, end_date);
            return Err(ContractError::DepositsClosed);
        }

        // 1. Principal cap.
        let prev_total = Self::read_total_deposited(&env);
        let new_total = prev_total
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if new_total > config.max_balance {
            return Err(ContractError::MaxDepositsReached);
        }

        // 2. Reward reserve: everything promised so far plus this deposit's
        //    full accrual to the end date must fit in the surplus.
        let token_client = token::Client::new(&env, &config.token);
        let this = env.current_contract_address();
        let surplus = token_client.balance(&this).saturating_sub(prev_total);
        let commitment = rewards::max_accrual(amount, config.apy, end_date.saturating_sub(now))
            .ok_or(ContractError::ArithmeticOverflow)?;
        let committed = Self::read_committed(&env)
            .checked_add(commitment)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if committed > surplus {
            log!(&env, "reward reserve exhausted", committed, surplus);
            return Err(ContractError::InsufficientRewardReserve);
        }

        // 3. Checkpoint, then grow the position.
        let mut record = Self::checkpoint(&env, &config, &staker, now)?;
        record.balance = record
            .balance
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        ledger::store_record(&env, &staker, &record);
        env.storage().instance().set(&TOTAL_DEPOSITED, &new_total);
        env.storage().instance().set(&COMMITTED, &committed);

        // 4. Pull tokens from the staker under the ledger's allowance.
        token_client.transfer_from(&this, &staker, &this, &amount);

        events::publish_deposited(&env, staker, amount, record.balance, new_total);

        Ok(())
    }

    // ── Withdrawals ─────────────────────────────────────────────────────────

    /// Withdraw `amount` from the caller's pooled claim (principal plus
    /// rewards earned so far).
    ///
    /// Accrued rewards are drawn first; whatever remains comes out of
    /// principal and leaves `total_deposited`.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        if !ledger::has_record(&env, &staker) {
            return Err(ContractError::StakeNotFound);
        }

        let config = Self::load_config(&env)?;
        let now = env.ledger().timestamp();

        // 1. Lock in everything earned up to now.
        let mut record = Self::checkpoint(&env, &config, &staker, now)?;

        // 2. Verify the claim covers the request.
        let claim = record.claim().ok_or(ContractError::ArithmeticOverflow)?;
        if amount > claim {
            return Err(ContractError::WithdrawExceedsClaim);
        }

        // 3. Split across rewards and principal.
        let from_rewards = amount.min(record.accrued_rewards);
        let from_principal = amount.saturating_sub(from_rewards);
        record.accrued_rewards = record.accrued_rewards.saturating_sub(from_rewards);
        record.balance = record.balance.saturating_sub(from_principal);

        let new_total = Self::read_total_deposited(&env).saturating_sub(from_principal);
        let committed = Self::read_committed(&env).saturating_sub(from_rewards);

        ledger::store_record(&env, &staker, &record);
        env.storage().instance().set(&TOTAL_DEPOSITED, &new_total);
        env.storage().instance().set(&COMMITTED, &committed);

        // 4. Pay out.
        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_withdrawn(&env, staker, from_principal, from_rewards, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out the caller's accrued rewards, leaving principal staked.
    ///
    /// Returns the amount paid, or zero without reverting when nothing is
    /// owed.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if !ledger::has_record(&env, &staker) {
            return Ok(0);
        }

        let config = Self::load_config(&env)?;
        let now = env.ledger().timestamp();

        let mut record = Self::checkpoint(&env, &config, &staker, now)?;
        let earned = record.accrued_rewards;
        if earned <= 0 {
            ledger::store_record(&env, &staker, &record);
            return Ok(0);
        }

        record.accrued_rewards = 0;
        let committed = Self::read_committed(&env).saturating_sub(earned);

        ledger::store_record(&env, &staker, &record);
        env.storage().instance().set(&COMMITTED, &committed);

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &staker,
            &earned,
        );

        events::publish_rewards_claimed(&env, staker, earned);

        Ok(earned)
    }

    /// Rewards `staker` could withdraw right now, without mutating state.
    ///
    /// Frozen once the ledger time passes the end date.
    pub fn calculate_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        let Some(record) = ledger::get_record(&env, &staker) else {
            return Ok(0);
        };

        let cutoff = schedule::accrual_cutoff(&env, env.ledger().timestamp());
        let pending = Self::pending_since_checkpoint(&env, &config, &record, cutoff)?;

        record
            .accrued_rewards
            .checked_add(pending)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the user's staked principal.
    pub fn balances_by_user(env: Env, staker: Address) -> i128 {
        ledger::get_record(&env, &staker)
            .map(|r| r.balance)
            .unwrap_or(0)
    }

    /// Return the sum of all stakers' principal.
    pub fn total_deposited(env: Env) -> i128 {
        Self::read_total_deposited(&env)
    }

    /// Return the current ledger timestamp.
    pub fn get_date(env: Env) -> u64 {
        env.ledger().timestamp()
    }

    pub fn get_end_date(env: Env) -> u64 {
        schedule::end_date(&env)
    }

    /// Return the windows during which accrual was suspended.
    pub fn get_accrual_pauses(env: Env) -> soroban_sdk::Vec<AccrualPause> {
        schedule::pauses(&env)
    }

    pub fn get_config(env: Env) -> Result<StakeConfig, ContractError> {
        Self::load_config(&env)
    }

    /// Return the raw checkpointed record, if the user ever deposited.
    pub fn get_stake(env: Env, staker: Address) -> Option<StakeRecord> {
        ledger::get_record(&env, &staker)
    }

    /// Return principal and live rewards for a user in one call.
    pub fn get_staker_info(env: Env, staker: Address) -> Result<StakerInfo, ContractError> {
        let config = Self::load_config(&env)?;
        let record = ledger::get_record(&env, &staker)
            .unwrap_or_else(|| StakeRecord::opened_at(env.ledger().timestamp()));

        let cutoff = schedule::accrual_cutoff(&env, env.ledger().timestamp());
        let pending = Self::pending_since_checkpoint(&env, &config, &record, cutoff)?;

        Ok(StakerInfo {
            balance: record.balance,
            rewards: record
                .accrued_rewards
                .checked_add(pending)
                .ok_or(ContractError::ArithmeticOverflow)?,
            last_update: record.last_update,
        })
    }

    /// Return the rewards the ledger has promised and not yet paid.
    pub fn get_committed_rewards(env: Env) -> i128 {
        Self::read_committed(&env)
    }

    /// Return the token surplus not yet promised to anyone.
    ///
    /// `token balance − total_deposited − committed_rewards`. Deposits whose
    /// full accrual exceeds this are rejected.
    pub fn get_reward_reserve(env: Env) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        let held = token::Client::new(&env, &config.token).balance(&env.current_contract_address());

        Ok(held
            .saturating_sub(Self::read_total_deposited(&env))
            .saturating_sub(Self::read_committed(&env)))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Move the end date to `new_end_date`, which must be in the future.
    ///
    /// If accrual had already stopped, it resumes from this call onward; the
    /// gap since the old end date earns nothing. Extending the date reserves
    /// the extra accrual on all current principal.
    pub fn set_end_date(env: Env, caller: Address, new_end_date: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let now = env.ledger().timestamp();
        if new_end_date <= now {
            return Err(ContractError::EndDateNotInFuture);
        }

        let config = Self::load_config(&env)?;
        let previous = schedule::end_date(&env);

        let extension_start = previous.max(now);
        if new_end_date > extension_start {
            let extra = rewards::max_accrual(
                Self::read_total_deposited(&env),
                config.apy,
                new_end_date - extension_start,
            )
            .ok_or(ContractError::ArithmeticOverflow)?;
            let committed = Self::read_committed(&env)
                .checked_add(extra)
                .ok_or(ContractError::ArithmeticOverflow)?;
            env.storage().instance().set(&COMMITTED, &committed);
        }

        let pause = schedule::replace_end_date(&env, new_end_date, now);
        if let Some(p) = &pause {
            log!(&env, "accrual resumed after pause", p.start, p.end);
        }

        events::publish_end_date_set(&env, previous, new_end_date, pause.is_some());

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<StakeConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn read_total_deposited(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_DEPOSITED).unwrap_or(0)
    }

    fn read_committed(env: &Env) -> i128 {
        env.storage().instance().get(&COMMITTED).unwrap_or(0)
    }

    /// Rewards earned on `record.balance` between its checkpoint and
    /// `cutoff`, skipping paused windows.
    fn pending_since_checkpoint(
        env: &Env,
        config: &StakeConfig,
        record: &StakeRecord,
        cutoff: u64,
    ) -> Result<i128, ContractError> {
        let pauses = schedule::pauses(env);
        let elapsed = rewards::active_seconds(
            record.last_update,
            cutoff,
            pauses.iter().map(|p| (p.start, p.end)),
        );

        rewards::accrued(record.balance, config.apy, elapsed)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Per-user checkpoint.
    ///
    /// 1. Clamp the accrual window to the end date.
    /// 2. Fold everything earned since the last checkpoint into
    ///    `accrued_rewards`.
    /// 3. Move `last_update` to the clamped time so later calls start fresh.
    ///
    /// The caller persists the returned record.
    fn checkpoint(
        env: &Env,
        config: &StakeConfig,
        staker: &Address,
        now: u64,
    ) -> Result<StakeRecord, ContractError> {
        let cutoff = schedule::accrual_cutoff(env, now);
        let mut record =
            ledger::get_record(env, staker).unwrap_or_else(|| StakeRecord::opened_at(cutoff));

        let earned = Self::pending_since_checkpoint(env, config, &record, cutoff)?;
        record.accrued_rewards = record
            .accrued_rewards
            .checked_add(earned)
            .ok_or(ContractError::ArithmeticOverflow)?;
        record.last_update = cutoff;

        Ok(record)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
