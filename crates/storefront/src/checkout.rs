//! Order draft validation and submission.
//!
//! Validation runs entirely client-side before any network dispatch: a
//! draft with missing fields or an empty cart never reaches the backend.
//! On a successful placement the cart is cleared; on failure it is left
//! untouched so the shopper can resubmit.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use velours_core::{CartItem, Email, EmailError, OrderItem};

use crate::api::{ApiClient, ApiError, OrderConfirmation};
use crate::storage::StorageError;
use crate::stores::CartStore;

/// Validation failures caught before dispatch.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required form field is empty.
    #[error("le champ `{0}` est requis")]
    MissingField(&'static str),

    /// The email address is malformed.
    #[error("adresse email invalide: {0}")]
    InvalidEmail(#[from] EmailError),

    /// There is nothing to order.
    #[error("le panier est vide")]
    EmptyCart,

    /// A cart line carries a non-positive quantity.
    #[error("quantité invalide pour `{0}`")]
    InvalidQuantity(String),

    /// A cart line carries a non-positive price.
    #[error("prix invalide pour `{0}`")]
    InvalidPrice(String),
}

/// Errors surfaced by [`place_order`].
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The draft failed validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] CheckoutError),

    /// The backend rejected the order or the request failed; the cart is
    /// intact and the order may be resubmitted.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The order was placed but clearing the cart failed.
    #[error("order placed but cart cleanup failed: {0}")]
    Storage(#[from] StorageError),
}

/// The delivery form as the shopper fills it in.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// The order body the backend expects.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub user_email: String,
    pub user_full_name: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: String,
    pub phone: String,
}

impl OrderDraft {
    /// Validate the draft against the cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`CheckoutError`] encountered: an empty required
    /// field, a malformed email, an empty cart, or a degenerate line.
    pub fn validate(&self, items: &[CartItem]) -> Result<(), CheckoutError> {
        required(&self.full_name, "nom complet")?;
        required(&self.email, "email")?;
        required(&self.phone, "téléphone")?;
        required(&self.address, "adresse")?;
        required(&self.city, "ville")?;
        required(&self.postal_code, "code postal")?;

        Email::parse(self.email.trim())?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        for item in items {
            if item.quantity == 0 {
                return Err(CheckoutError::InvalidQuantity(item.product.name.clone()));
            }
            if item.product.price <= Decimal::ZERO {
                return Err(CheckoutError::InvalidPrice(item.product.name.clone()));
            }
        }

        Ok(())
    }

    /// Validate and assemble the backend payload.
    ///
    /// The shipping address collapses to `"{address}, {city} {postal}"`;
    /// each cart line becomes an order item carrying the unit price at
    /// order time.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] if validation fails.
    pub fn into_payload(self, items: &[CartItem]) -> Result<OrderPayload, CheckoutError> {
        self.validate(items)?;

        let order_items = items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                name: item.product.name.clone(),
                size: item.size.clone(),
                color: item.color.clone(),
                quantity: item.quantity,
                price: item.product.price,
            })
            .collect();

        Ok(OrderPayload {
            user_email: self.email.trim().to_owned(),
            user_full_name: self.full_name.trim().to_owned(),
            items: order_items,
            shipping_address: format!("{}, {} {}", self.address, self.city, self.postal_code),
            phone: self.phone,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<(), CheckoutError> {
    if value.trim().is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(())
}

/// Validate the draft, submit the order, and clear the cart on success.
///
/// # Errors
///
/// Returns [`PlaceOrderError::Invalid`] without touching the network if
/// validation fails, [`PlaceOrderError::Api`] if the backend rejects the
/// order (cart intact), or [`PlaceOrderError::Storage`] if the post-success
/// cart cleanup fails.
#[instrument(skip(api, cart, draft))]
pub async fn place_order(
    api: &ApiClient,
    cart: &mut CartStore,
    draft: OrderDraft,
) -> Result<OrderConfirmation, PlaceOrderError> {
    let payload = draft.into_payload(cart.items())?;
    let confirmation = api.place_order(&payload).await?;
    cart.clear()?;
    Ok(confirmation)
}
