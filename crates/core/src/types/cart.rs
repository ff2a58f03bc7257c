//! Cart and favorites records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId};
use super::product::Product;

/// A favorited product.
///
/// Favorites are full product snapshots keyed by product id, so the
/// favorites view renders without refetching the catalog.
pub type FavoriteEntry = Product;

/// One line in the cart: a specific product/size/color/quantity combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Line item ID, derived from the product/size/color and creation time.
    pub id: CartItemId,
    /// Owning product ID (duplicated out of `product` for cheap lookups).
    pub product_id: ProductId,
    /// Product snapshot at the time of the add.
    pub product: Product,
    /// Selected size label.
    pub size: String,
    /// Selected color label.
    pub color: String,
    /// Number of units. Always at least 1; a quantity of 0 removes the line.
    pub quantity: u32,
}

impl CartItem {
    /// Create a new line item.
    ///
    /// The ID embeds the product id, the whitespace-stripped size and color,
    /// and the creation timestamp in milliseconds - the timestamp keeps ids
    /// unique when the same combination is re-added after removal.
    #[must_use]
    pub fn new(
        product: Product,
        size: &str,
        color: &str,
        quantity: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = CartItemId::new(format!(
            "{}-{}-{}-{}",
            product.id,
            compact(size),
            compact(color),
            created_at.timestamp_millis()
        ));

        Self {
            id,
            product_id: product.id.clone(),
            product,
            size: size.to_owned(),
            color: color.to_owned(),
            quantity,
        }
    }

    /// Whether this line holds the given product/size/color combination.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        self.product_id == *product_id && self.size == size && self.color == color
    }

    /// Line total: unit price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Strip all whitespace from a label for use inside an ID.
fn compact(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).collect()
}
