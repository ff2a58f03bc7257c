//! Order domain records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::status::OrderStatus;

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Ordered product ID.
    pub product_id: ProductId,
    /// Product name at order time.
    pub name: String,
    /// Selected size label.
    pub size: String,
    /// Selected color label.
    pub color: String,
    /// Number of units.
    pub quantity: u32,
    /// Unit price at order time, in dinars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderItem {
    /// Line total: unit price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A placed order.
///
/// Created by checkout, then approved or rejected by the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Shopper email as entered at checkout.
    pub user_email: String,
    /// Shopper full name as entered at checkout.
    pub user_full_name: String,
    /// Ordered lines.
    pub items: Vec<OrderItem>,
    /// Order total in dinars.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Free-form shipping address ("street, city postal-code").
    pub shipping_address: String,
    /// Contact phone number.
    pub phone: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
