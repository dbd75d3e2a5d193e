#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the execution window.
//!
//! Invariants tested:
//! - `queue_transaction` accepts `eta` exactly when `eta >= now + delay`
//! - `execute_transaction` succeeds only inside `[eta, eta + GRACE_PERIOD]`
//! - A transaction executes at most once

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{symbol_short, vec, Address, Env, IntoVal, Symbol, Val, Vec};
use timelock::{
    ContractError, ExecutionOutcome, TimelockContract, TimelockContractClient, GRACE_PERIOD,
    MAXIMUM_DELAY, MINIMUM_DELAY,
};

const START: u64 = 1_700_000_000;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup(delay: u64) -> (Env, TimelockContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let contract_id = env.register(TimelockContract, ());
    let client = TimelockContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let value_token = Address::generate(&env);
    client.initialize(&admin, &delay, &value_token);

    (env, client, admin)
}

/// A self-targeted `set_delay` call: always succeeds when executed.
fn set_delay_call(env: &Env) -> (Symbol, Vec<Val>) {
    (
        symbol_short!("set_delay"),
        vec![env, MINIMUM_DELAY.into_val(env)],
    )
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The queue accepts an eta exactly when it is at least `delay` away.
    #[test]
    fn prop_queue_respects_delay(
        delay in MINIMUM_DELAY..=MAXIMUM_DELAY,
        offset in -1_000_000i64..=1_000_000i64,
    ) {
        let (env, client, admin) = setup(delay);
        let (sig, args) = set_delay_call(&env);
        let eta = (START + delay).checked_add_signed(offset).unwrap();

        let result = client.try_queue_transaction(&admin, &client.address, &0, &sig, &args, &eta);
        if offset >= 0 {
            prop_assert!(result.is_ok());
        } else {
            match result {
                Err(Ok(e)) => prop_assert_eq!(e, ContractError::EtaTooSoon),
                _ => prop_assert!(false, "Expected EtaTooSoon error"),
            }
        }
    }

    /// Execution is possible only inside the window, and only once.
    #[test]
    fn prop_execute_only_inside_window(
        delay in MINIMUM_DELAY..=MAXIMUM_DELAY,
        at in 0u64..=(MAXIMUM_DELAY + 2 * GRACE_PERIOD),
    ) {
        let (env, client, admin) = setup(delay);
        let (sig, args) = set_delay_call(&env);
        let eta = START + delay;
        let key = client.queue_transaction(&admin, &client.address, &0, &sig, &args, &eta);

        let now = START + at;
        env.ledger().set_timestamp(now);
        let result = client.try_execute_transaction(&admin, &client.address, &0, &sig, &args, &eta);

        if now < eta {
            match result {
                Err(Ok(e)) => prop_assert_eq!(e, ContractError::TransactionNotSurpassedLock),
                _ => prop_assert!(false, "Expected TransactionNotSurpassedLock error"),
            }
            prop_assert!(client.is_queued(&key));
        } else if now > eta + GRACE_PERIOD {
            match result {
                Err(Ok(e)) => prop_assert_eq!(e, ContractError::TransactionStale),
                _ => prop_assert!(false, "Expected TransactionStale error"),
            }
            prop_assert!(client.is_queued(&key));
        } else {
            prop_assert!(matches!(result, Ok(Ok(ExecutionOutcome::Executed))));
            prop_assert!(!client.is_queued(&key));
            prop_assert_eq!(client.delay(), MINIMUM_DELAY);

            let again = client.try_execute_transaction(&admin, &client.address, &0, &sig, &args, &eta);
            match again {
                Err(Ok(e)) => prop_assert_eq!(e, ContractError::TransactionNotQueued),
                _ => prop_assert!(false, "Expected TransactionNotQueued error"),
            }
        }
    }
}
