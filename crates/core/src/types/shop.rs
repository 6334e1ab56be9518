//! Catalog records: shops and their surplus items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::ShopKey;
use crate::geo::GeoPoint;

/// A shop profile with its current surplus item list.
///
/// Owned by the catalog collaborator; the bot reads shops and appends items
/// but never creates or deletes records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    /// Stable shop identifier, doubles as the routing token in commands.
    pub key: ShopKey,
    /// Display name shown in replies and button labels.
    pub name: String,
    /// Shop location, used for nearby ranking.
    pub location: GeoPoint,
    /// Today's discounted items, in posting order.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// A single discounted surplus item.
///
/// Items are appended and never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item display name.
    pub name: String,
    /// Regular price in yen.
    pub price: Decimal,
    /// Discounted price in yen.
    pub discount_price: Decimal,
    /// Pickup deadline, free-form as the shop posted it (e.g. "19:00").
    #[serde(default)]
    pub deadline: String,
}
