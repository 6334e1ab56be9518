//! Catalog collaborator: shop lookup and item append.
//!
//! The engine depends only on the [`Catalog`] trait; the backing store is
//! chosen per deployment. [`InMemoryCatalog`] is the baseline, seeded from a
//! JSON file at startup. A store-backed implementation would run its I/O in
//! `spawn_blocking` behind the same interface.

use std::path::Path;
use std::sync::RwLock;

use thiserror::Error;

use otoku_core::{ItemRecord, ShopKey, ShopRecord};

/// Errors that can occur in catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the seed file.
    #[error("Failed to read catalog seed: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid shop JSON.
    #[error("Failed to parse catalog seed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Item append targeted a shop that does not exist.
    #[error("Unknown shop: {0}")]
    UnknownShop(ShopKey),

    /// Backing store failure.
    #[error("Catalog store error: {0}")]
    Store(String),
}

/// Read-mostly shop catalog.
///
/// `keys` must enumerate in a stable order; the ranker's tie-breaking
/// depends on it.
pub trait Catalog: Send + Sync {
    /// Look up a shop by key.
    ///
    /// # Errors
    ///
    /// Returns error only on store failure; an unknown key is `Ok(None)`.
    fn get(&self, key: &ShopKey) -> Result<Option<ShopRecord>, CatalogError>;

    /// Enumerate all shop keys in catalog order.
    ///
    /// # Errors
    ///
    /// Returns error on store failure.
    fn keys(&self) -> Result<Vec<ShopKey>, CatalogError>;

    /// Append an item to a shop's list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownShop`] if the shop does not exist.
    fn append_item(&self, key: &ShopKey, item: ItemRecord) -> Result<(), CatalogError>;
}

/// In-memory catalog preserving seed-file order.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    shops: RwLock<Vec<ShopRecord>>,
}

impl InMemoryCatalog {
    /// Create a catalog from pre-built records.
    #[must_use]
    pub fn from_shops(shops: Vec<ShopRecord>) -> Self {
        Self {
            shops: RwLock::new(shops),
        }
    }

    /// Load a catalog from a JSON seed file (an array of shop records).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let shops: Vec<ShopRecord> = serde_json::from_str(&raw)?;
        Ok(Self::from_shops(shops))
    }

    /// Number of shops in the catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog lock is poisoned.
    pub fn len(&self) -> Result<usize, CatalogError> {
        Ok(self.read()?.len())
    }

    /// Whether the catalog is empty.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<ShopRecord>>, CatalogError> {
        self.shops
            .read()
            .map_err(|_| CatalogError::Store("catalog lock poisoned".to_string()))
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, key: &ShopKey) -> Result<Option<ShopRecord>, CatalogError> {
        Ok(self.read()?.iter().find(|s| &s.key == key).cloned())
    }

    fn keys(&self) -> Result<Vec<ShopKey>, CatalogError> {
        Ok(self.read()?.iter().map(|s| s.key.clone()).collect())
    }

    fn append_item(&self, key: &ShopKey, item: ItemRecord) -> Result<(), CatalogError> {
        let mut shops = self
            .shops
            .write()
            .map_err(|_| CatalogError::Store("catalog lock poisoned".to_string()))?;

        let shop = shops
            .iter_mut()
            .find(|s| &s.key == key)
            .ok_or_else(|| CatalogError::UnknownShop(key.clone()))?;

        shop.items.push(item);
        Ok(())
    }
}
