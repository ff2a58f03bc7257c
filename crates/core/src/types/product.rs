//! Catalog domain records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::format_amount;
use super::status::Rating;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Banner image URL.
    pub image_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A product in the catalog.
///
/// Immutable from the shopper's perspective; only the back office edits
/// products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Plain text description.
    pub description: String,
    /// Unit price in dinars (3 fraction digits).
    pub price: Decimal,
    /// Owning category ID.
    pub category_id: CategoryId,
    /// Category snapshot, when the backend embeds it.
    pub category: Option<Category>,
    /// Absolute image URLs, in display order.
    pub images: Vec<String>,
    /// Available size labels (e.g., `"S"`, `"M"`, `"38"`).
    pub sizes: Vec<String>,
    /// Available color labels (names, hex, or `rgb()` literals).
    pub colors: Vec<String>,
    /// Review rating (4 to 5 stars).
    pub rating: Rating,
    /// Units in stock.
    pub stock_quantity: u32,
    /// Featured on the best-sellers shelf.
    pub is_featured: bool,
    /// Tagged as a new arrival.
    pub is_new: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether any units are left to sell.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Price formatted for display (e.g., `"89.900 TND"`).
    #[must_use]
    pub fn price_display(&self) -> String {
        format_amount(self.price)
    }
}
