//! Profile aggregation over transfer and purchase records.
//!
//! The storage layer fetches the raw rows; this module turns them into the
//! profile shape the request layer serializes. Ordering of inventory lines
//! and transfer lists is not significant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user's aggregated profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Current wallet balance, in coins.
    pub balance: i64,
    /// Owned items with quantities; zero-quantity lines are omitted.
    pub inventory: Vec<InventoryLine>,
    /// Transfers received by the user.
    pub incoming: Vec<IncomingTransfer>,
    /// Transfers sent by the user.
    pub outgoing: Vec<OutgoingTransfer>,
}

/// One owned catalog item with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    /// Catalog item name.
    pub item: String,
    /// Number of copies owned.
    pub quantity: u64,
}

/// A transfer received from another user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingTransfer {
    /// Username of the sender.
    pub from_user: String,
    /// Transferred amount, in coins.
    pub amount: i64,
}

/// A transfer sent to another user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingTransfer {
    /// Username of the receiver.
    pub to_user: String,
    /// Transferred amount, in coins.
    pub amount: i64,
}

/// Groups purchased item names into inventory lines with quantities.
///
/// Only items that were actually purchased appear; every returned line has
/// `quantity > 0`.
pub fn build_inventory<I, S>(item_names: I) -> Vec<InventoryLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for name in item_names {
        *counts.entry(name.as_ref().to_string()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(item, quantity)| InventoryLine { item, quantity })
        .collect()
}
