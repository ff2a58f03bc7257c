//! Raw back-office payloads and their conversion to domain records.
//!
//! Same discipline as the storefront's product boundary: the backend's
//! loosely-shaped order and user documents are validated here and come
//! out as tagged `Result`s.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use thiserror::Error;

use velours_core::{Email, Order, OrderId, OrderItem, OrderStatus, ProductId, User, UserId, UserRole};

/// Errors produced by the payload parse step.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The order status is not one of `pending`/`approved`/`rejected`.
    #[error("order `{id}`: unknown status `{status}`")]
    InvalidStatus {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        status: String,
    },

    /// An amount is negative or not representable as a decimal.
    #[error("order `{id}`: invalid amount {amount}")]
    InvalidAmount {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        amount: f64,
    },

    /// A timestamp is not RFC 3339.
    #[error("record `{id}`: invalid timestamp `{value}`")]
    InvalidTimestamp {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        value: String,
    },

    /// A user record carries a malformed email.
    #[error("user `{id}`: invalid email `{email}`")]
    InvalidEmail {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        email: String,
    },

    /// A user record carries an unknown role.
    #[error("user `{id}`: unknown role `{role}`")]
    InvalidRole {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        role: String,
    },
}

// =============================================================================
// Orders
// =============================================================================

/// An order document as the backend serves it.
#[derive(Debug, Deserialize)]
pub struct RawOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: String,
    pub user_full_name: String,
    #[serde(default)]
    pub items: Vec<RawOrderItem>,
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// One line of an order document.
#[derive(Debug, Deserialize)]
pub struct RawOrderItem {
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    pub quantity: u32,
    pub price: f64,
}

impl RawOrder {
    /// Validate and convert into a domain [`Order`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for an unknown status, a bad amount, or a
    /// malformed timestamp.
    pub fn into_order(self) -> Result<Order, ParseError> {
        let status: OrderStatus =
            self.status
                .parse()
                .map_err(|_| ParseError::InvalidStatus {
                    id: self.id.clone(),
                    status: self.status.clone(),
                })?;

        let total_amount = decimal_amount(&self.id, self.total_amount)?.round_dp(3);

        let created_at: DateTime<Utc> =
            self.created_at
                .parse()
                .map_err(|_| ParseError::InvalidTimestamp {
                    id: self.id.clone(),
                    value: self.created_at.clone(),
                })?;

        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            let price = decimal_amount(&self.id, item.price)?.round_dp(3);
            items.push(OrderItem {
                product_id: ProductId::new(item.product_id),
                name: item.name,
                size: item.size,
                color: item.color,
                quantity: item.quantity,
                price,
            });
        }

        Ok(Order {
            id: OrderId::new(self.id),
            user_email: self.user_email,
            user_full_name: self.user_full_name,
            items,
            total_amount,
            status,
            shipping_address: self.shipping_address,
            phone: self.phone,
            created_at,
        })
    }
}

fn decimal_amount(id: &str, amount: f64) -> Result<Decimal, ParseError> {
    Decimal::from_f64(amount)
        .filter(|a| !a.is_sign_negative())
        .ok_or_else(|| ParseError::InvalidAmount {
            id: id.to_owned(),
            amount,
        })
}

/// Parse an order listing, failing on the first invalid record.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first record that fails validation.
pub fn parse_orders(raw: Vec<RawOrder>) -> Result<Vec<Order>, ParseError> {
    raw.into_iter().map(RawOrder::into_order).collect()
}

// =============================================================================
// Users
// =============================================================================

/// A user document as the backend serves it.
#[derive(Debug, Deserialize)]
pub struct RawUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default, rename = "isApproved")]
    pub is_approved: bool,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

impl RawUser {
    /// Validate and convert into a domain [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for a malformed email, an unknown role, or a
    /// malformed timestamp.
    pub fn into_user(self) -> Result<User, ParseError> {
        let email = Email::parse(&self.email).map_err(|_| ParseError::InvalidEmail {
            id: self.id.clone(),
            email: self.email.clone(),
        })?;

        let role: UserRole = self.role.parse().map_err(|_| ParseError::InvalidRole {
            id: self.id.clone(),
            role: self.role.clone(),
        })?;

        let created_at = match &self.created_at {
            Some(value) => Some(value.parse().map_err(|_| ParseError::InvalidTimestamp {
                id: self.id.clone(),
                value: value.clone(),
            })?),
            None => None,
        };

        Ok(User {
            id: UserId::new(self.id),
            email,
            full_name: self.full_name,
            role,
            is_approved: self.is_approved,
            created_at,
        })
    }
}

/// Parse a user listing, failing on the first invalid record.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first record that fails validation.
pub fn parse_users(raw: Vec<RawUser>) -> Result<Vec<User>, ParseError> {
    raw.into_iter().map(RawUser::into_user).collect()
}
