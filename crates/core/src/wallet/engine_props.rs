//! Property-based tests for the wallet invariant engine.
//!
//! The two invariants every mutation path must uphold:
//! - No balance ever goes negative.
//! - Transfers conserve the total number of coins; debits remove exactly
//!   the debited amount from circulation.

use proptest::prelude::*;

use super::engine::WalletEngine;
use super::error::WalletError;

/// Strategy for realistic wallet balances.
fn balance() -> impl Strategy<Value = i64> {
    0i64..10_000_000i64
}

/// Strategy for positive coin amounts.
fn positive_amount() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A successful transfer conserves the total number of coins.
    #[test]
    fn prop_transfer_conserves_total(
        sender in balance(),
        receiver in balance(),
        amount in positive_amount(),
    ) {
        if let Ok(result) = WalletEngine::apply_transfer(sender, receiver, amount) {
            prop_assert_eq!(result.sender + result.receiver, sender + receiver);
        }
    }

    /// Successful transfers never produce a negative balance on either side.
    #[test]
    fn prop_transfer_balances_stay_non_negative(
        sender in balance(),
        receiver in balance(),
        amount in positive_amount(),
    ) {
        if let Ok(result) = WalletEngine::apply_transfer(sender, receiver, amount) {
            prop_assert!(result.sender >= 0);
            prop_assert!(result.receiver >= 0);
        }
    }

    /// A transfer succeeds exactly when the sender can cover the amount.
    #[test]
    fn prop_transfer_succeeds_iff_covered(
        sender in balance(),
        receiver in balance(),
        amount in positive_amount(),
    ) {
        let result = WalletEngine::apply_transfer(sender, receiver, amount);
        if sender >= amount {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result,
                Err(WalletError::InsufficientFunds { balance: sender, amount })
            );
        }
    }

    /// Non-positive amounts are rejected before any balance is inspected.
    #[test]
    fn prop_non_positive_amount_always_rejected(
        sender in balance(),
        receiver in balance(),
        amount in i64::MIN..=0i64,
    ) {
        prop_assert_eq!(
            WalletEngine::apply_transfer(sender, receiver, amount),
            Err(WalletError::InvalidAmount { amount })
        );
        prop_assert_eq!(
            WalletEngine::apply_debit(sender, amount),
            Err(WalletError::InvalidAmount { amount })
        );
    }

    /// A successful debit removes exactly the debited amount.
    #[test]
    fn prop_debit_removes_exact_amount(
        wallet in balance(),
        amount in positive_amount(),
    ) {
        if let Ok(new_balance) = WalletEngine::apply_debit(wallet, amount) {
            prop_assert_eq!(new_balance, wallet - amount);
            prop_assert!(new_balance >= 0);
        }
    }

    /// Crediting near `i64::MAX` fails closed instead of wrapping.
    #[test]
    fn prop_overflow_fails_closed(
        sender in positive_amount(),
        headroom in 0i64..1_000i64,
    ) {
        let receiver = i64::MAX - headroom;
        let result = WalletEngine::apply_transfer(sender, receiver, sender);
        if sender > headroom {
            prop_assert_eq!(result, Err(WalletError::BalanceOverflow));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
