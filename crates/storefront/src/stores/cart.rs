//! The shopping cart store.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use velours_core::{CartItem, CartItemId, Product};

use crate::storage::{StorageBackend, StorageError, keys};

use super::rehydrate;

/// What an [`CartStore::add`] call did, for user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line was appended.
    Added {
        /// Name of the added product.
        product_name: String,
    },
    /// An existing line's quantity was increased.
    QuantityUpdated {
        /// Name of the affected product.
        product_name: String,
    },
    /// The request was a no-op (zero quantity).
    Ignored,
}

impl CartOutcome {
    /// The toast message shown to the shopper, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Added { product_name } => {
                Some(format!("Produit ajouté au panier : {product_name}"))
            }
            Self::QuantityUpdated { product_name } => {
                Some(format!("Quantité mise à jour pour {product_name}"))
            }
            Self::Ignored => None,
        }
    }
}

/// The shopping cart: an ordered collection of line items, one per unique
/// (product, size, color) combination.
///
/// Owned by the application session; every mutation writes through to the
/// injected storage backend under the `cart` key.
pub struct CartStore {
    items: Vec<CartItem>,
    storage: Arc<dyn StorageBackend>,
}

impl CartStore {
    /// Rehydrate the cart from storage.
    ///
    /// An unreadable payload resets the cart to empty (see
    /// [`super::rehydrate`]).
    #[must_use]
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let items = rehydrate(storage.as_ref(), keys::CART);
        Self { items, storage }
    }

    /// Add `quantity` units of a product/size/color combination.
    ///
    /// If a line already exists for the combination its quantity is
    /// increased; otherwise a new line is appended. A zero quantity is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails; the in-memory
    /// collection is left unchanged in that case.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<CartOutcome, StorageError> {
        if quantity == 0 {
            debug!("ignoring add with zero quantity");
            return Ok(CartOutcome::Ignored);
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product.id, size, color))
        {
            existing.quantity += quantity;
            self.persist()?;
            return Ok(CartOutcome::QuantityUpdated {
                product_name: product.name.clone(),
            });
        }

        self.items
            .push(CartItem::new(product.clone(), size, color, quantity, Utc::now()));
        self.persist()?;
        Ok(CartOutcome::Added {
            product_name: product.name.clone(),
        })
    }

    /// Set a line's quantity directly. A quantity of `0` removes the line.
    ///
    /// Quantities are not clamped against stock: the backend re-validates
    /// at order placement.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<(), StorageError> {
        if quantity == 0 {
            return self.remove(item_id);
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == *item_id) {
            item.quantity = quantity;
            self.persist()?;
        }
        Ok(())
    }

    /// Remove a line. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    #[instrument(skip(self))]
    pub fn remove(&mut self, item_id: &CartItemId) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != *item_id);
        if self.items.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Empty the cart. Invoked after a successful order placement.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines. Recomputed on every read.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total price across all lines. Recomputed on every read.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Mirror the collection to storage.
    fn persist(&self) -> Result<(), StorageError> {
        // Vec<CartItem> serialization is infallible in practice.
        let payload = serde_json::to_string(&self.items).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to serialize cart");
            String::from("[]")
        });
        self.storage.set(keys::CART, &payload)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;
    use velours_core::{CategoryId, ProductId, Rating};

    fn product(id: &str, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price,
            category_id: CategoryId::new("unisexe"),
            category: None,
            images: vec![],
            sizes: vec!["S".to_owned(), "M".to_owned()],
            colors: vec!["Noir".to_owned(), "Blanc".to_owned()],
            rating: Rating::Five,
            stock_quantity: 5,
            is_featured: false,
            is_new: false,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn store() -> CartStore {
        CartStore::load(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::new(89_900, 3));

        let outcome = cart.add(&p1, "M", "Noir", 2).unwrap();
        assert_eq!(
            outcome,
            CartOutcome::Added {
                product_name: "Veste".to_owned()
            }
        );
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Decimal::new(179_800, 3));
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::ONE);

        cart.add(&p1, "M", "Noir", 1).unwrap();
        let outcome = cart.add(&p1, "M", "Noir", 3).unwrap();

        assert_eq!(
            outcome,
            CartOutcome::QuantityUpdated {
                product_name: "Veste".to_owned()
            }
        );
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_distinct_combinations_get_distinct_lines() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::ONE);

        cart.add(&p1, "M", "Noir", 1).unwrap();
        cart.add(&p1, "L", "Noir", 1).unwrap();
        cart.add(&p1, "M", "Blanc", 1).unwrap();

        assert_eq!(cart.items().len(), 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_zero_quantity_add_is_ignored() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::ONE);

        let outcome = cart.add(&p1, "M", "Noir", 0).unwrap();
        assert_eq!(outcome, CartOutcome::Ignored);
        assert!(outcome.message().is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_directly() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::ONE);
        cart.add(&p1, "M", "Noir", 2).unwrap();
        let id = cart.items()[0].id.clone();

        cart.update_quantity(&id, 7).unwrap();
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::ONE);
        cart.add(&p1, "M", "Noir", 2).unwrap();
        let id = cart.items()[0].id.clone();

        cart.update_quantity(&id, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = store();
        let p1 = product("p1", "Veste", Decimal::ONE);
        cart.add(&p1, "M", "Noir", 1).unwrap();
        let id = cart.items()[0].id.clone();

        cart.remove(&id).unwrap();
        cart.remove(&id).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price_sums_lines() {
        let mut cart = store();
        cart.add(&product("p1", "Veste", Decimal::new(10_000, 3)), "M", "Noir", 2)
            .unwrap();
        cart.add(&product("p2", "Pull", Decimal::new(5_500, 3)), "S", "Blanc", 3)
            .unwrap();

        // 2 x 10.000 + 3 x 5.500
        assert_eq!(cart.total_price(), Decimal::new(36_500, 3));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_write_through_survives_reload() {
        let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let p1 = product("p1", "Veste", Decimal::ONE);

        let mut cart = CartStore::load(Arc::clone(&storage));
        cart.add(&p1, "M", "Noir", 2).unwrap();

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.total_items(), 2);
        assert_eq!(reloaded.items()[0].size, "M");
    }

    #[test]
    fn test_corrupt_payload_resets_cart() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CART, "{definitely not a cart").unwrap();

        let cart = CartStore::load(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::load(Arc::clone(&storage));
        cart.add(&product("p1", "Veste", Decimal::ONE), "M", "Noir", 1)
            .unwrap();

        cart.clear().unwrap();
        assert!(cart.is_empty());

        let reloaded = CartStore::load(storage);
        assert!(reloaded.is_empty());
    }
}
