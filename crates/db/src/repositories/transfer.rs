//! Transfer repository for peer-to-peer coin moves.
//!
//! A transfer is one atomic unit: both wallet rows are locked with
//! `SELECT ... FOR UPDATE`, balances are re-read under lock, mutated
//! through the invariant engine, and the immutable transfer record is
//! appended before the transaction commits. Either everything commits or
//! nothing does.

use chrono::Utc;
use coinmerch_core::wallet::{WalletEngine, WalletError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{transactions, users, wallets};

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Balance invariant violation (invalid amount, insufficient funds).
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Sender and receiver must be different users.
    #[error("Cannot transfer coins to yourself")]
    SameParty,

    /// No user exists with the given receiver username.
    #[error("Receiver not found: {0}")]
    ReceiverNotFound(String),

    /// The sender has no wallet row; provisioning invariant violated.
    #[error("No wallet exists for sender {0}")]
    SenderWalletMissing(Uuid),

    /// The receiver has no wallet row; provisioning invariant violated.
    #[error("No wallet exists for receiver {0}")]
    ReceiverWalletMissing(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl TransferError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Wallet(e) => e.error_code(),
            Self::SameParty => "SAME_PARTY",
            Self::ReceiverNotFound(_) => "RECEIVER_NOT_FOUND",
            Self::SenderWalletMissing(_) => "SENDER_WALLET_MISSING",
            Self::ReceiverWalletMissing(_) => "RECEIVER_WALLET_MISSING",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true if this error is transient and eligible for retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Transfer repository for sending coins between users.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends `amount` coins from `sender_id` to the user named
    /// `receiver_username`, appending the immutable transfer record.
    ///
    /// Wallet rows are locked in ascending `user_id` order so that
    /// concurrent transfers touching the same pair of wallets can never
    /// deadlock, whichever direction they run in.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` (via `Wallet`) for non-positive amounts,
    /// `ReceiverNotFound` for an unknown username, `SameParty` for a
    /// self-transfer, `InsufficientFunds` (via `Wallet`) when the sender
    /// cannot cover the amount, and `Database` for storage faults. No
    /// balance is mutated on any error path.
    pub async fn send_coins(
        &self,
        sender_id: Uuid,
        receiver_username: &str,
        amount: i64,
    ) -> Result<transactions::Model, TransferError> {
        WalletEngine::validate_amount(amount)?;

        let receiver = users::Entity::find()
            .filter(users::Column::Username.eq(receiver_username))
            .one(&self.db)
            .await?
            .ok_or_else(|| TransferError::ReceiverNotFound(receiver_username.to_string()))?;

        if receiver.id == sender_id {
            return Err(TransferError::SameParty);
        }

        let txn = self.db.begin().await?;

        // Lock both rows in ascending user_id order, then sort out which
        // side is which.
        let (sender_wallet, receiver_wallet) = if sender_id < receiver.id {
            let sender = Self::lock_wallet(&txn, sender_id)
                .await?
                .ok_or(TransferError::SenderWalletMissing(sender_id))?;
            let recv = Self::lock_wallet(&txn, receiver.id)
                .await?
                .ok_or(TransferError::ReceiverWalletMissing(receiver.id))?;
            (sender, recv)
        } else {
            let recv = Self::lock_wallet(&txn, receiver.id)
                .await?
                .ok_or(TransferError::ReceiverWalletMissing(receiver.id))?;
            let sender = Self::lock_wallet(&txn, sender_id)
                .await?
                .ok_or(TransferError::SenderWalletMissing(sender_id))?;
            (sender, recv)
        };

        let balances =
            WalletEngine::apply_transfer(sender_wallet.balance, receiver_wallet.balance, amount)?;

        let now = Utc::now().into();

        let mut sender_active: wallets::ActiveModel = sender_wallet.into();
        sender_active.balance = Set(balances.sender);
        sender_active.updated_at = Set(now);
        sender_active.update(&txn).await?;

        let mut receiver_active: wallets::ActiveModel = receiver_wallet.into();
        receiver_active.balance = Set(balances.receiver);
        receiver_active.updated_at = Set(now);
        receiver_active.update(&txn).await?;

        let record = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            receiver_id: Set(receiver.id),
            amount: Set(amount),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::debug!(
            sender_id = %sender_id,
            receiver_id = %receiver.id,
            amount,
            "transfer committed"
        );

        Ok(record)
    }

    /// Fetches a wallet row under an exclusive row lock.
    async fn lock_wallet(
        txn: &DatabaseTransaction,
        user_id: Uuid,
    ) -> Result<Option<wallets::Model>, DbErr> {
        wallets::Entity::find_by_id(user_id)
            .lock_exclusive()
            .one(txn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_delegate_to_wallet() {
        let err = TransferError::Wallet(WalletError::InsufficientFunds {
            balance: 40,
            amount: 60,
        });
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");

        let err = TransferError::Wallet(WalletError::InvalidAmount { amount: 0 });
        assert_eq!(err.error_code(), "INVALID_AMOUNT");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TransferError::SameParty.error_code(), "SAME_PARTY");
        assert_eq!(
            TransferError::ReceiverNotFound("bob".to_string()).error_code(),
            "RECEIVER_NOT_FOUND"
        );
        assert_eq!(
            TransferError::SenderWalletMissing(Uuid::nil()).error_code(),
            "SENDER_WALLET_MISSING"
        );
    }

    #[test]
    fn test_only_database_errors_are_retryable() {
        assert!(TransferError::Database(DbErr::Custom("timeout".to_string())).is_retryable());
        assert!(!TransferError::SameParty.is_retryable());
        assert!(
            !TransferError::Wallet(WalletError::InsufficientFunds {
                balance: 0,
                amount: 1,
            })
            .is_retryable()
        );
    }
}
