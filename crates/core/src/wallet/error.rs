//! Wallet error types.

use thiserror::Error;

/// Errors that can occur while applying balance mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    /// Amount must be a positive number of coins.
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: i64,
    },

    /// The source wallet does not hold enough coins.
    #[error("Insufficient funds: balance {balance}, required {amount}")]
    InsufficientFunds {
        /// Balance of the source wallet at the time of the check.
        balance: i64,
        /// Amount the operation tried to debit.
        amount: i64,
    },

    /// Crediting the destination wallet would overflow its balance.
    #[error("Wallet balance would overflow")]
    BalanceOverflow,
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::BalanceOverflow => "BALANCE_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            WalletError::InvalidAmount { amount: 0 }.error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            WalletError::InsufficientFunds {
                balance: 10,
                amount: 20,
            }
            .error_code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(WalletError::BalanceOverflow.error_code(), "BALANCE_OVERFLOW");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WalletError::InvalidAmount { amount: -5 }.to_string(),
            "Amount must be positive, got -5"
        );
        assert_eq!(
            WalletError::InsufficientFunds {
                balance: 40,
                amount: 60,
            }
            .to_string(),
            "Insufficient funds: balance 40, required 60"
        );
    }
}
