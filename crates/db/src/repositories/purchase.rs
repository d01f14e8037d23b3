//! Purchase repository for buying catalog items.
//!
//! Prices always come from the injected catalog, never from caller input.
//! The debit and the purchase record land in one database transaction with
//! the buyer's wallet row held under an exclusive lock.

use chrono::Utc;
use coinmerch_core::catalog::{Catalog, CatalogError};
use coinmerch_core::wallet::{WalletEngine, WalletError};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{purchases, wallets};

/// Error types for purchase operations.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    /// Catalog violation (unknown item, price mismatch).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Balance invariant violation (insufficient funds).
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The buyer has no wallet row; provisioning invariant violated.
    #[error("No wallet exists for user {0}")]
    WalletMissing(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PurchaseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Wallet(e) => e.error_code(),
            Self::WalletMissing(_) => "WALLET_MISSING",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true if this error is transient and eligible for retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Purchase repository for debiting wallets against the catalog.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
    catalog: Catalog,
}

impl PurchaseRepository {
    /// Creates a new purchase repository over the given catalog.
    #[must_use]
    pub const fn new(db: DatabaseConnection, catalog: Catalog) -> Self {
        Self { db, catalog }
    }

    /// Buys one `item_name` for `buyer_id` at the catalog price, appending
    /// the immutable purchase record.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` (via `Catalog`) if the item does not exist,
    /// `InsufficientFunds` (via `Wallet`) when the buyer cannot cover the
    /// price, and `Database` for storage faults. No balance is mutated on
    /// any error path.
    pub async fn buy_item(
        &self,
        buyer_id: Uuid,
        item_name: &str,
    ) -> Result<purchases::Model, PurchaseError> {
        let price = self
            .catalog
            .lookup(item_name)
            .ok_or_else(|| CatalogError::UnknownItem(item_name.to_string()))?;

        let txn = self.db.begin().await?;

        let wallet = wallets::Entity::find_by_id(buyer_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PurchaseError::WalletMissing(buyer_id))?;

        let new_balance = WalletEngine::apply_debit(wallet.balance, price)?;

        let now = Utc::now().into();

        let mut wallet_active: wallets::ActiveModel = wallet.into();
        wallet_active.balance = Set(new_balance);
        wallet_active.updated_at = Set(now);
        wallet_active.update(&txn).await?;

        // The record stores the price it was bought at; re-check it against
        // the catalog before the insert.
        self.catalog.validate_price(item_name, price)?;

        let record = purchases::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(buyer_id),
            item_name: Set(item_name.to_string()),
            item_price: Set(price),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::debug!(
            buyer_id = %buyer_id,
            item = item_name,
            price,
            "purchase committed"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_delegate() {
        let err = PurchaseError::Catalog(CatalogError::UnknownItem("beanie".to_string()));
        assert_eq!(err.error_code(), "UNKNOWN_ITEM");

        let err = PurchaseError::Wallet(WalletError::InsufficientFunds {
            balance: 10,
            amount: 80,
        });
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");

        assert_eq!(
            PurchaseError::WalletMissing(Uuid::nil()).error_code(),
            "WALLET_MISSING"
        );
    }

    #[test]
    fn test_only_database_errors_are_retryable() {
        assert!(PurchaseError::Database(DbErr::Custom("timeout".to_string())).is_retryable());
        assert!(
            !PurchaseError::Catalog(CatalogError::UnknownItem("beanie".to_string())).is_retryable()
        );
    }
}
