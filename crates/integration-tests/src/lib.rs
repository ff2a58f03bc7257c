//! Integration tests for Velours.
//!
//! # Running Tests
//!
//! ```bash
//! # Store and catalog flows (no backend required)
//! cargo test -p velours-integration-tests
//!
//! # Network tests against a running backend
//! VELOURS_API_URL=http://localhost:5000 \
//!     cargo test -p velours-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart and favorites flows over file-backed storage
//! - `catalog_browse` - Filter/sort/facet/pagination over a fixture catalog
//! - `live_api` - Storefront and admin clients against a real backend
//!   (ignored by default)

use std::path::PathBuf;
use std::sync::Arc;

use chrono::TimeZone;
use rust_decimal::Decimal;

use velours_core::{CategoryId, Product, ProductId, Rating};
use velours_storefront::storage::{FileStorage, StorageBackend};

/// A fresh file-backed storage rooted in a unique temp directory.
///
/// The directory is left behind on panic for post-mortem inspection;
/// callers remove it with [`cleanup`] at the end of the test.
#[must_use]
pub fn temp_storage() -> (Arc<dyn StorageBackend>, PathBuf) {
    let dir = std::env::temp_dir().join(format!("velours-it-{}", uuid::Uuid::new_v4()));
    let storage = FileStorage::new(&dir).expect("failed to create temp storage");
    (Arc::new(storage), dir)
}

/// Remove a temp storage directory.
pub fn cleanup(dir: &PathBuf) {
    std::fs::remove_dir_all(dir).ok();
}

/// Build a fixture product.
#[must_use]
pub fn product(id: &str, name: &str, price: i64, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: format!("Description de {name}"),
        price: Decimal::from(price),
        category_id: CategoryId::new(category),
        category: None,
        images: vec![],
        sizes: vec!["S".to_owned(), "M".to_owned(), "L".to_owned()],
        colors: vec!["Noir".to_owned(), "Blanc".to_owned()],
        rating: Rating::Five,
        stock_quantity: 10,
        is_featured: category == "best-seller",
        is_new: false,
        created_at: chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid date"),
    }
}
