/// Length of the accrual year in seconds (365 days).
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// `apy` is expressed in whole percent, so 100 means the principal is earned
/// again over one full year.
pub const APY_DENOMINATOR: i128 = 100;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Linear yield earned by `balance` over `elapsed` seconds.
///
/// ```text
/// reward = balance × apy × elapsed / (100 × SECONDS_PER_YEAR)
/// ```
///
/// The division floors, so callers that checkpoint frequently may lose
/// sub-unit dust. Returns `None` when an intermediate product overflows i128.
///
/// # Arguments
/// * `balance` – principal the reward accrues on
/// * `apy`     – annual percentage rate in whole percent
/// * `elapsed` – seconds of active accrual
pub fn accrued(balance: i128, apy: u32, elapsed: u64) -> Option<i128> {
    if balance <= 0 || apy == 0 || elapsed == 0 {
        return Some(0);
    }

    let denominator = APY_DENOMINATOR.checked_mul(SECONDS_PER_YEAR as i128)?;

    balance
        .checked_mul(apy as i128)?
        .checked_mul(elapsed as i128)?
        .checked_div(denominator)
}

/// Upper bound on what `balance` can earn over `span` seconds.
///
/// Same formula as [`accrued`] but rounded up. Reserve commitments use it so
/// the sum of floored per-checkpoint rewards can never exceed what was set
/// aside, however the accrual ends up being split.
pub fn max_accrual(balance: i128, apy: u32, span: u64) -> Option<i128> {
    if balance <= 0 || apy == 0 || span == 0 {
        return Some(0);
    }

    let denominator = APY_DENOMINATOR.checked_mul(SECONDS_PER_YEAR as i128)?;
    let numerator = balance
        .checked_mul(apy as i128)?
        .checked_mul(span as i128)?;

    numerator
        .checked_add(denominator - 1)?
        .checked_div(denominator)
}

/// Seconds in `[from, to)` during which rewards were actually accruing.
///
/// `pauses` are `(start, end)` windows in which accrual was suspended; their
/// overlap with the interval is subtracted. Windows never overlap each other
/// because each one begins at an end date that was already in the past.
pub fn active_seconds<I>(from: u64, to: u64, pauses: I) -> u64
where
    I: IntoIterator<Item = (u64, u64)>,
{
    if to <= from {
        return 0;
    }

    let paused: u64 = pauses
        .into_iter()
        .map(|(start, end)| {
            let lo = start.max(from);
            let hi = end.min(to);
            hi.saturating_sub(lo)
        })
        .fold(0u64, |acc, s| acc.saturating_add(s));

    (to - from).saturating_sub(paused)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no Soroban environment needed.
