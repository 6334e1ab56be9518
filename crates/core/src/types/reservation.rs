//! Reservation entries appended by the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::key::UserId;

/// A single reservation against a shop's surplus inventory.
///
/// Entries are appended in arrival order and never updated or deleted;
/// downstream fulfillment relies on that ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationEntry {
    /// Opaque identifier of the reserving user.
    pub user_id: UserId,
    /// Reserved item name, absent when the deployment only collects counts.
    pub item_name: Option<String>,
    /// Number of units reserved, always at least 1.
    pub quantity: u32,
    /// When the reservation arrived.
    pub created_at: DateTime<Utc>,
}

impl ReservationEntry {
    /// Create an entry timestamped now.
    #[must_use]
    pub fn new(user_id: UserId, item_name: Option<String>, quantity: u32) -> Self {
        Self {
            user_id,
            item_name,
            quantity,
            created_at: Utc::now(),
        }
    }
}
