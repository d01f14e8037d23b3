//! Wallet invariant engine.
//!
//! Pure balance arithmetic: validation, debit/credit pairs for transfers,
//! and single debits for purchases. Callers read balances under exclusive
//! row locks and persist whatever this engine returns; either both sides of
//! a mutation commit or neither does, but that atomicity is the storage
//! layer's job, not this module's.

use super::error::WalletError;

/// Post-transfer balances for both wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferBalances {
    /// Sender balance after the debit.
    pub sender: i64,
    /// Receiver balance after the credit.
    pub receiver: i64,
}

/// Wallet invariant engine.
///
/// Contains pure balance logic with no storage dependencies. Every mutation
/// path enforces the two wallet invariants: amounts are positive, balances
/// never go negative.
pub struct WalletEngine;

impl WalletEngine {
    /// Validates that an amount is a positive number of coins.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for zero or negative amounts.
    pub const fn validate_amount(amount: i64) -> Result<(), WalletError> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount { amount });
        }
        Ok(())
    }

    /// Applies a peer-to-peer transfer to a pair of balances.
    ///
    /// Debits `sender_balance` and credits `receiver_balance` by `amount`,
    /// returning the new pair. No mutation outcome is produced on failure.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for non-positive amounts, `InsufficientFunds`
    /// when the sender balance cannot cover the amount, and
    /// `BalanceOverflow` if crediting the receiver would exceed `i64::MAX`.
    pub fn apply_transfer(
        sender_balance: i64,
        receiver_balance: i64,
        amount: i64,
    ) -> Result<TransferBalances, WalletError> {
        Self::validate_amount(amount)?;

        let sender = Self::debit(sender_balance, amount)?;
        let receiver = receiver_balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow)?;

        Ok(TransferBalances { sender, receiver })
    }

    /// Applies a purchase debit to a single balance, returning the new one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for non-positive amounts and
    /// `InsufficientFunds` when the balance cannot cover the amount.
    pub fn apply_debit(balance: i64, amount: i64) -> Result<i64, WalletError> {
        Self::validate_amount(amount)?;
        Self::debit(balance, amount)
    }

    /// Subtracts `amount` from `balance`, refusing to go negative.
    fn debit(balance: i64, amount: i64) -> Result<i64, WalletError> {
        if balance < amount {
            return Err(WalletError::InsufficientFunds { balance, amount });
        }
        // amount <= balance here, so the subtraction cannot wrap.
        Ok(balance - amount)
    }
}
