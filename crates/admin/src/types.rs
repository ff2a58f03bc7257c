//! Back-office payload types and form validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use velours_core::UserRole;

/// Dashboard statistics. The backend serializes camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminStats {
    /// Total number of orders.
    #[serde(rename = "ordersCount")]
    pub orders_count: u64,
    /// Total number of products.
    #[serde(rename = "productsCount")]
    pub products_count: u64,
    /// Lifetime revenue in dinars.
    #[serde(rename = "totalRevenue", with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

/// Body for creating an admin account.
#[derive(Debug, Clone, Serialize)]
pub struct NewAdminUser {
    pub full_name: String,
    pub email: String,
    /// Optional initial password; the backend invites when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: UserRole,
}

/// Partial update body for an admin account. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(rename = "isApproved", skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

/// Form validation failures, caught before network dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// The product name is empty.
    #[error("le nom du produit est requis")]
    MissingName,

    /// The price is zero or negative.
    #[error("le prix doit être positif")]
    NonPositivePrice,

    /// The category is empty.
    #[error("la catégorie est requise")]
    MissingCategory,

    /// No size selected.
    #[error("sélectionnez au moins une taille")]
    NoSizes,

    /// No color selected.
    #[error("sélectionnez au moins une couleur")]
    NoColors,
}

/// An image file attached to a product form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, forwarded as the multipart part's file name.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// The product authoring form, submitted as multipart form data.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock_quantity: u32,
    pub is_featured: bool,
    pub is_new: bool,
    /// New images to upload alongside the document fields.
    pub images: Vec<ImageUpload>,
}

impl ProductForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] encountered: empty name or
    /// category, non-positive price, or empty size/color selection.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        if self.price <= Decimal::ZERO {
            return Err(FormError::NonPositivePrice);
        }
        if self.category.trim().is_empty() {
            return Err(FormError::MissingCategory);
        }
        if self.sizes.iter().all(|s| s.trim().is_empty()) {
            return Err(FormError::NoSizes);
        }
        if self.colors.iter().all(|c| c.trim().is_empty()) {
            return Err(FormError::NoColors);
        }
        Ok(())
    }

    /// Validate and assemble the multipart body.
    ///
    /// Prices are fixed to three decimals; the size and color selections
    /// travel as JSON-encoded arrays, matching the backend's form parser.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if validation fails.
    pub fn into_multipart(self) -> Result<reqwest::multipart::Form, FormError> {
        self.validate()?;

        let sizes: Vec<String> = self
            .sizes
            .into_iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        let colors: Vec<String> = self
            .colors
            .into_iter()
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect();

        let mut form = reqwest::multipart::Form::new()
            .text("name", self.name.trim().to_owned())
            .text("description", self.description.trim().to_owned())
            .text("price", format!("{:.3}", self.price))
            .text("category", self.category.trim().to_owned())
            .text("sizes", json_array(&sizes))
            .text("colors", json_array(&colors))
            .text("stock", self.stock_quantity.to_string())
            .text("is_featured", self.is_featured.to_string())
            .text("is_new", self.is_new.to_string());

        for image in self.images {
            let part = reqwest::multipart::Part::bytes(image.bytes).file_name(image.file_name);
            form = form.part("images", part);
        }

        Ok(form)
    }
}

/// Encode a string list as a JSON array literal.
fn json_array(values: &[String]) -> String {
    // Vec<String> serialization is infallible in practice.
    serde_json::to_string(values).unwrap_or_else(|_| String::from("[]"))
}
