//! Catalog error types.

use thiserror::Error;

/// Errors that can occur during catalog construction and lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested item does not exist in the catalog.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// A claimed price does not match the catalog price.
    #[error("Price mismatch for {item}: expected {expected}, claimed {claimed}")]
    PriceMismatch {
        /// The item whose price was checked.
        item: String,
        /// The catalog price.
        expected: i64,
        /// The price the caller claimed.
        claimed: i64,
    },

    /// An item was configured with a non-positive price.
    #[error("Invalid price for {item}: {price}")]
    InvalidPrice {
        /// The offending item.
        item: String,
        /// The rejected price.
        price: i64,
    },

    /// An item was configured with an empty name.
    #[error("Catalog item names must be non-empty")]
    EmptyItemName,
}

impl CatalogError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem(_) => "UNKNOWN_ITEM",
            Self::PriceMismatch { .. } => "PRICE_MISMATCH",
            Self::InvalidPrice { .. } => "INVALID_PRICE",
            Self::EmptyItemName => "EMPTY_ITEM_NAME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CatalogError::UnknownItem("beanie".to_string()).error_code(),
            "UNKNOWN_ITEM"
        );
        assert_eq!(
            CatalogError::PriceMismatch {
                item: "cup".to_string(),
                expected: 20,
                claimed: 15,
            }
            .error_code(),
            "PRICE_MISMATCH"
        );
        assert_eq!(
            CatalogError::InvalidPrice {
                item: "cup".to_string(),
                price: 0,
            }
            .error_code(),
            "INVALID_PRICE"
        );
        assert_eq!(CatalogError::EmptyItemName.error_code(), "EMPTY_ITEM_NAME");
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::PriceMismatch {
            item: "cup".to_string(),
            expected: 20,
            claimed: 15,
        };
        assert_eq!(
            err.to_string(),
            "Price mismatch for cup: expected 20, claimed 15"
        );
    }
}
