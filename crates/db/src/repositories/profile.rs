//! Profile repository for history aggregation.
//!
//! Read-only: no row locks are taken, so a profile is a point-in-time
//! snapshot that may trail concurrent mutations. Neither the transfer
//! lists nor the inventory promise any particular order.

use std::collections::HashMap;

use coinmerch_core::history::{self, IncomingTransfer, OutgoingTransfer, Profile};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{purchases, transactions, users, wallets};

/// Error types for profile aggregation.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// No wallet exists for the user; provisioning invariant violated.
    #[error("No wallet exists for user {0}")]
    WalletNotFound(Uuid),

    /// A transfer record references a user row that no longer exists.
    #[error("Transfer counterparty {0} no longer exists")]
    CounterpartyMissing(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ProfileError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotFound(_) => "WALLET_NOT_FOUND",
            Self::CounterpartyMissing(_) => "COUNTERPARTY_MISSING",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Profile repository reconstructing balance, inventory, and transfer
/// history from the ledger tables.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the full profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `WalletNotFound` if the user has no wallet (which account
    /// provisioning should make impossible) and `Database` for storage
    /// faults.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile, ProfileError> {
        let wallet = wallets::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(ProfileError::WalletNotFound(user_id))?;

        let owned = purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        let inventory = history::build_inventory(owned.iter().map(|p| p.item_name.as_str()));

        let received = transactions::Entity::find()
            .filter(transactions::Column::ReceiverId.eq(user_id))
            .all(&self.db)
            .await?;
        let sent = transactions::Entity::find()
            .filter(transactions::Column::SenderId.eq(user_id))
            .all(&self.db)
            .await?;

        let usernames = self.counterparty_usernames(&received, &sent).await?;
        let username_of = |id: Uuid| -> Result<String, ProfileError> {
            usernames
                .get(&id)
                .cloned()
                .ok_or(ProfileError::CounterpartyMissing(id))
        };

        let incoming = received
            .into_iter()
            .map(|t| {
                Ok(IncomingTransfer {
                    from_user: username_of(t.sender_id)?,
                    amount: t.amount,
                })
            })
            .collect::<Result<Vec<_>, ProfileError>>()?;

        let outgoing = sent
            .into_iter()
            .map(|t| {
                Ok(OutgoingTransfer {
                    to_user: username_of(t.receiver_id)?,
                    amount: t.amount,
                })
            })
            .collect::<Result<Vec<_>, ProfileError>>()?;

        Ok(Profile {
            balance: wallet.balance,
            inventory,
            incoming,
            outgoing,
        })
    }

    /// Resolves the usernames of every counterparty in one query.
    async fn counterparty_usernames(
        &self,
        received: &[transactions::Model],
        sent: &[transactions::Model],
    ) -> Result<HashMap<Uuid, String>, DbErr> {
        let mut ids: Vec<Uuid> = received
            .iter()
            .map(|t| t.sender_id)
            .chain(sent.iter().map(|t| t.receiver_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = users::Entity::find()
            .filter(users::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|u| (u.id, u.username)).collect())
    }
}
