//! User repository for account and wallet provisioning.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{users, wallets};

/// Error types for user and wallet provisioning.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Username is already registered.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Username must be non-empty.
    #[error("Username must be non-empty")]
    EmptyUsername,

    /// Starting balance must not be negative.
    #[error("Starting balance must not be negative, got {0}")]
    InvalidStartingBalance(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl UserError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
            Self::EmptyUsername => "EMPTY_USERNAME",
            Self::InvalidStartingBalance(_) => "INVALID_STARTING_BALANCE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// User repository for account creation and lookups.
///
/// Account creation provisions exactly one wallet together with the user
/// row; the wallet primary key and the unique constraint on `username`
/// guarantee there is never a user without a wallet or a second wallet for
/// the same user.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user and their wallet in one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken` if the username is already registered,
    /// `EmptyUsername`/`InvalidStartingBalance` for invalid input, and
    /// `Database` for storage faults.
    pub async fn create_with_wallet(
        &self,
        username: &str,
        starting_balance: i64,
    ) -> Result<(users::Model, wallets::Model), UserError> {
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        if starting_balance < 0 {
            return Err(UserError::InvalidStartingBalance(starting_balance));
        }

        let now = Utc::now().into();
        let txn = self.db.begin().await?;

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                UserError::UsernameTaken(username.to_string())
            }
            _ => UserError::Database(e),
        })?;

        let wallet = wallets::ActiveModel {
            user_id: Set(user.id),
            balance: Set(starting_balance),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::debug!(user_id = %user.id, balance = wallet.balance, "provisioned user wallet");

        Ok((user, wallet))
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, UserError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, UserError> {
        let user = users::Entity::find_by_id(id).one(&self.db).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            UserError::UsernameTaken("alice".to_string()).error_code(),
            "USERNAME_TAKEN"
        );
        assert_eq!(UserError::EmptyUsername.error_code(), "EMPTY_USERNAME");
        assert_eq!(
            UserError::InvalidStartingBalance(-1).error_code(),
            "INVALID_STARTING_BALANCE"
        );
    }
}
