//! Balance invariant enforcement.
//!
//! This module is the only place wallet balance arithmetic happens:
//! - Amount validation (transfers and purchases accept positive amounts only)
//! - Debit/credit pairs for peer-to-peer transfers
//! - Single debits for purchases
//!
//! The storage layer reads balances under row locks, calls into this module,
//! and persists the result in the same database transaction. Nothing here
//! touches storage.

pub mod engine;
pub mod error;

#[cfg(test)]
mod engine_props;

pub use engine::{TransferBalances, WalletEngine};
pub use error::WalletError;
