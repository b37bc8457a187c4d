#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for time-based accrual.
//!
//! Invariants tested:
//! - `calculate_rewards` never decreases while the end date is ahead
//! - past the end date it is constant, however much time passes
//! - accrual is linear in principal and time (floored)
//! - a staker's rewards do not depend on other stakers' activity

use proptest::prelude::*;

use crate::common::{advance, new_staker, setup, START, UNIT};

const YEAR: u64 = 31_536_000;

fn expected(balance: i128, apy: u32, elapsed: u64) -> i128 {
    balance * apy as i128 * elapsed as i128 / (100 * YEAR as i128)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Rewards are non-decreasing before the end date and frozen after it.
    #[test]
    fn prop_rewards_monotonic_then_frozen(
        steps in prop::collection::vec(1u64..=5_000_000, 1..16),
        whole in 100i128..=1_000,
    ) {
        let f = setup(1_000 * UNIT, 100 * UNIT, 100, 1_000_000 * UNIT);
        let staker = new_staker(&f, 1_000 * UNIT);
        f.client.set_end_date(&f.admin, &(START + YEAR));
        f.client.deposit(&staker, &(whole * UNIT));

        let mut previous = 0i128;
        for step in &steps {
            advance(&f, *step);
            let current = f.client.calculate_rewards(&staker);
            prop_assert!(current >= previous, "rewards went backwards");
            previous = current;
        }

        advance(&f, YEAR);
        let frozen = f.client.calculate_rewards(&staker);
        prop_assert_eq!(frozen, expected(whole * UNIT, 100, YEAR));

        for step in &steps {
            advance(&f, *step);
            prop_assert_eq!(f.client.calculate_rewards(&staker), frozen);
        }
    }

    /// A single deposit earns exactly the floored linear formula.
    #[test]
    fn prop_linear_accrual_matches_formula(
        whole in 100i128..=1_000,
        apy in 0u32..=500,
        elapsed in 0u64..=(5 * YEAR),
    ) {
        let f = setup(1_000 * UNIT, 100 * UNIT, apy, 1_000_000 * UNIT);
        let staker = new_staker(&f, 1_000 * UNIT);
        f.client.deposit(&staker, &(whole * UNIT));

        advance(&f, elapsed);
        prop_assert_eq!(
            f.client.calculate_rewards(&staker),
            expected(whole * UNIT, apy, elapsed)
        );
    }

    /// Another staker coming and going leaves the first staker's rewards
    /// untouched.
    #[test]
    fn prop_no_cross_user_interference(
        offset in 0u64..=YEAR,
        hold in 0u64..=YEAR,
        other in 100i128..=500,
    ) {
        let f = setup(1_000 * UNIT, 100 * UNIT, 100, 1_000_000 * UNIT);
        let alice = new_staker(&f, 1_000 * UNIT);
        let bob = new_staker(&f, 1_000 * UNIT);

        f.client.deposit(&alice, &(100 * UNIT));
        advance(&f, offset);
        f.client.deposit(&bob, &(other * UNIT));
        advance(&f, hold);
        let _ = f.client.try_withdraw(&bob, &(other * UNIT));

        prop_assert_eq!(
            f.client.calculate_rewards(&alice),
            expected(100 * UNIT, 100, offset + hold)
        );
    }
}
