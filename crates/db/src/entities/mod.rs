//! `SeaORM` entity definitions.

pub mod purchases;
pub mod transactions;
pub mod users;
pub mod wallets;
