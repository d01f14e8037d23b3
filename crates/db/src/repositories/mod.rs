//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod profile;
pub mod purchase;
pub mod transfer;
pub mod user;

pub use profile::{ProfileError, ProfileRepository};
pub use purchase::{PurchaseError, PurchaseRepository};
pub use transfer::{TransferError, TransferRepository};
pub use user::{UserError, UserRepository};
