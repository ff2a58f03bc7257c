//! The favorites store.

use std::sync::Arc;

use tracing::instrument;

use velours_core::{FavoriteEntry, Product, ProductId};

use crate::storage::{StorageBackend, StorageError, keys};

use super::rehydrate;

/// The favorites collection: product snapshots keyed by product id, with
/// set semantics (no duplicates).
///
/// Persisted under the `favorites` key with the same write-through pattern
/// as the cart.
pub struct FavoritesStore {
    products: Vec<FavoriteEntry>,
    storage: Arc<dyn StorageBackend>,
}

impl FavoritesStore {
    /// Rehydrate the favorites from storage.
    ///
    /// An unreadable payload resets the collection to empty.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let products = rehydrate(storage.as_ref(), keys::FAVORITES);
        Self { products, storage }
    }

    /// Add a product snapshot. Returns `false` (and changes nothing) when
    /// the product is already favorited.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) -> Result<bool, StorageError> {
        if self.is_favorite(&product.id) {
            return Ok(false);
        }

        self.products.push(product.clone());
        self.persist()?;
        Ok(true)
    }

    /// Remove a product by id. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        let before = self.products.len();
        self.products.retain(|product| product.id != *product_id);
        if self.products.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Membership test by product id.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.products.iter().any(|product| product.id == *product_id)
    }

    /// The favorited snapshots, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[FavoriteEntry] {
        &self.products
    }

    /// Number of favorited products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no products are favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Mirror the collection to storage.
    fn persist(&self) -> Result<(), StorageError> {
        // Vec<Product> serialization is infallible in practice.
        let payload = serde_json::to_string(&self.products).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to serialize favorites");
            String::from("[]")
        });
        self.storage.set(keys::FAVORITES, &payload)
    }
}
