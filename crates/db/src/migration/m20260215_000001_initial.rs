//! Initial database migration.
//!
//! Creates the users, wallets, transactions, and purchases tables together
//! with their constraints, indexes, and append-only triggers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CORE TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(WALLETS_SQL).await?;

        // ============================================================
        // PART 2: LEDGER RECORDS
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(PURCHASES_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(150) NOT NULL UNIQUE CHECK (username <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const WALLETS_SQL: &str = r"
-- One wallet per user, provisioned together with the user row.
-- Deleting a user with a wallet is refused; the wallet must go first.
CREATE TABLE wallets (
    user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE RESTRICT,
    balance BIGINT NOT NULL CHECK (balance >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRANSACTIONS_SQL: &str = r"
-- Peer-to-peer transfer records. ON DELETE RESTRICT keeps either party
-- from being deleted while records reference them.
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    sender_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    receiver_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    amount BIGINT NOT NULL CHECK (amount > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (sender_id <> receiver_id)
);

CREATE INDEX idx_transactions_sender ON transactions(sender_id);
CREATE INDEX idx_transactions_receiver ON transactions(receiver_id);
";

const PURCHASES_SQL: &str = r"
CREATE TABLE purchases (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    item_name VARCHAR(100) NOT NULL CHECK (item_name <> ''),
    item_price BIGINT NOT NULL CHECK (item_price > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_purchases_user ON purchases(user_id);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: prevent_record_mutation
-- Transfer and purchase records are append-only
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_record_mutation()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Ledger records are append-only and cannot be modified or deleted.';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_transactions_append_only
BEFORE UPDATE OR DELETE ON transactions
FOR EACH ROW
EXECUTE FUNCTION prevent_record_mutation();

CREATE TRIGGER trg_purchases_append_only
BEFORE UPDATE OR DELETE ON purchases
FOR EACH ROW
EXECUTE FUNCTION prevent_record_mutation();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS purchases CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS wallets CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP FUNCTION IF EXISTS prevent_record_mutation CASCADE;
";
