//! Immutable item-to-price table.
//!
//! The catalog is built once at startup (from configuration or the built-in
//! standard table) and never mutated afterwards, so lookups need no
//! synchronization. Prices are validated at construction time; runtime
//! lookups never see a malformed table.

pub mod error;

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub use error::CatalogError;

/// The standard merch table: item name to price in coins.
const STANDARD_ITEMS: &[(&str, i64)] = &[
    ("t-shirt", 80),
    ("cup", 20),
    ("book", 50),
    ("pen", 10),
    ("powerbank", 200),
    ("hoody", 300),
    ("umbrella", 200),
    ("socks", 10),
    ("wallet", 50),
    ("pink-hoody", 500),
];

static STANDARD: Lazy<HashMap<String, i64>> = Lazy::new(|| {
    STANDARD_ITEMS
        .iter()
        .map(|&(name, price)| (name.to_string(), price))
        .collect()
});

/// Immutable item-to-price mapping.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: HashMap<String, i64>,
}

impl Catalog {
    /// Builds a catalog from an item-to-price map.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrice` for non-positive prices and `EmptyItemName`
    /// for empty names.
    pub fn new(items: HashMap<String, i64>) -> Result<Self, CatalogError> {
        for (name, &price) in &items {
            if name.is_empty() {
                return Err(CatalogError::EmptyItemName);
            }
            if price <= 0 {
                return Err(CatalogError::InvalidPrice {
                    item: name.clone(),
                    price,
                });
            }
        }
        Ok(Self { items })
    }

    /// Returns the built-in standard table.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            items: STANDARD.clone(),
        }
    }

    /// Looks up the price of an item, in coins.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<i64> {
        self.items.get(name).copied()
    }

    /// Checks a claimed price against the catalog price.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item is absent and `PriceMismatch` if
    /// the claimed price differs from the catalog price.
    pub fn validate_price(&self, name: &str, claimed: i64) -> Result<(), CatalogError> {
        let expected = self
            .lookup(name)
            .ok_or_else(|| CatalogError::UnknownItem(name.to_string()))?;

        if expected != claimed {
            return Err(CatalogError::PriceMismatch {
                item: name.to_string(),
                expected,
                claimed,
            });
        }
        Ok(())
    }

    /// Iterates over all catalog entries.
    pub fn items(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(name, &price)| (name.as_str(), price))
    }

    /// Returns the number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("t-shirt", 80)]
    #[case("cup", 20)]
    #[case("book", 50)]
    #[case("pen", 10)]
    #[case("powerbank", 200)]
    #[case("hoody", 300)]
    #[case("umbrella", 200)]
    #[case("socks", 10)]
    #[case("wallet", 50)]
    #[case("pink-hoody", 500)]
    fn test_standard_prices(#[case] item: &str, #[case] price: i64) {
        let catalog = Catalog::standard();
        assert_eq!(catalog.lookup(item), Some(price));
        assert!(catalog.validate_price(item, price).is_ok());
    }

    #[test]
    fn test_standard_has_ten_items() {
        assert_eq!(Catalog::standard().len(), 10);
    }

    #[test]
    fn test_items_iterates_every_entry_with_positive_price() {
        let catalog = Catalog::standard();
        let entries: Vec<_> = catalog.items().collect();
        assert_eq!(entries.len(), catalog.len());
        assert!(entries.iter().all(|&(_, price)| price > 0));
    }

    #[test]
    fn test_lookup_unknown_item() {
        assert_eq!(Catalog::standard().lookup("beanie"), None);
    }

    #[test]
    fn test_validate_price_unknown_item() {
        let result = Catalog::standard().validate_price("beanie", 100);
        assert_eq!(result, Err(CatalogError::UnknownItem("beanie".to_string())));
    }

    #[test]
    fn test_validate_price_mismatch() {
        let result = Catalog::standard().validate_price("cup", 25);
        assert_eq!(
            result,
            Err(CatalogError::PriceMismatch {
                item: "cup".to_string(),
                expected: 20,
                claimed: 25,
            })
        );
    }

    #[test]
    fn test_new_rejects_non_positive_price() {
        let items = HashMap::from([("freebie".to_string(), 0)]);
        assert_eq!(
            Catalog::new(items).unwrap_err(),
            CatalogError::InvalidPrice {
                item: "freebie".to_string(),
                price: 0,
            }
        );
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let items = HashMap::from([(String::new(), 10)]);
        assert_eq!(Catalog::new(items).unwrap_err(), CatalogError::EmptyItemName);
    }

    #[test]
    fn test_new_accepts_custom_table() {
        let items = HashMap::from([("sticker".to_string(), 5)]);
        let catalog = Catalog::new(items).unwrap();
        assert_eq!(catalog.lookup("sticker"), Some(5));
        assert_eq!(catalog.lookup("t-shirt"), None);
    }
}
