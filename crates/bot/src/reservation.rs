//! Reservation ledger: per-shop append-only reservation lists.
//!
//! The ledger performs no shop-existence validation; callers confirm the
//! shop against the catalog once before appending. Entries are never
//! deduplicated, updated, or deleted.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use otoku_core::{ReservationEntry, ShopKey};

/// Errors that can occur in ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Backing store failure.
    #[error("Ledger store error: {0}")]
    Store(String),
}

/// Append-only reservation store keyed by shop.
pub trait ReservationLedger: Send + Sync {
    /// Append an entry to a shop's reservation list.
    ///
    /// Appends for the same key must be atomic with respect to each other:
    /// concurrent appends never lose entries.
    ///
    /// # Errors
    ///
    /// Returns error only on store failure.
    fn append(&self, shop_key: &ShopKey, entry: ReservationEntry) -> Result<(), LedgerError>;

    /// Snapshot a shop's reservation list in arrival order.
    ///
    /// An unknown key yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns error only on store failure.
    fn list(&self, shop_key: &ShopKey) -> Result<Vec<ReservationEntry>, LedgerError>;
}

/// Mutex-guarded in-memory ledger.
///
/// Entries live for the process lifetime only; a restart drops them by
/// design of the in-memory variant.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: Mutex<HashMap<ShopKey, Vec<ReservationEntry>>>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ShopKey, Vec<ReservationEntry>>>, LedgerError>
    {
        self.entries
            .lock()
            .map_err(|_| LedgerError::Store("ledger lock poisoned".to_string()))
    }
}

impl ReservationLedger for InMemoryLedger {
    fn append(&self, shop_key: &ShopKey, entry: ReservationEntry) -> Result<(), LedgerError> {
        self.lock()?.entry(shop_key.clone()).or_default().push(entry);
        Ok(())
    }

    fn list(&self, shop_key: &ShopKey) -> Result<Vec<ReservationEntry>, LedgerError> {
        Ok(self.lock()?.get(shop_key).cloned().unwrap_or_default())
    }
}
