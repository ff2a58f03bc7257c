//! Raw backend payloads and their schema-validated conversion to domain
//! records.
//!
//! The backend's product documents are loosely shaped: Mongo-style `_id`,
//! floating-point prices, colors as either bare strings or `{name, code}`
//! objects, relative image paths. Everything crossing the API boundary goes
//! through an explicit parse step here and comes out as a
//! `Result<Product, ParseError>` - nothing downstream touches raw JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use velours_core::{Category, CategoryId, Product, ProductId, Rating};

/// Errors produced by the payload parse step.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required field is empty or absent.
    #[error("product `{id}`: missing required field `{field}`")]
    MissingField {
        /// Backend id of the offending record.
        id: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The price is negative or not representable as a decimal.
    #[error("product `{id}`: invalid price {price}")]
    InvalidPrice {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        price: f64,
    },

    /// The creation timestamp is not RFC 3339.
    #[error("product `{id}`: invalid created_at `{value}`")]
    InvalidTimestamp {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw value.
        value: String,
    },

    /// An image path does not resolve against the assets origin.
    #[error("product `{id}`: invalid image url `{path}`")]
    InvalidImageUrl {
        /// Backend id of the offending record.
        id: String,
        /// The rejected raw path.
        path: String,
    },
}

/// A product document as the backend serves it.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub colors: Vec<RawColor>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// A color entry: older documents store bare labels, newer ones store
/// `{name, code}` swatch objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Label(String),
    Swatch {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        code: Option<String>,
    },
}

impl RawColor {
    /// The displayable label: the name when present, else the code.
    fn into_label(self) -> Option<String> {
        let label = match self {
            Self::Label(label) => label,
            Self::Swatch { name, code } => name.or(code).unwrap_or_default(),
        };
        (!label.is_empty()).then_some(label)
    }
}

/// An image entry with a path relative to the backend origin.
#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl RawProduct {
    /// Validate and convert into a domain [`Product`].
    ///
    /// Image paths are absolutized against `assets_base`; the backend's
    /// bare category string becomes an embedded [`Category`] snapshot, as
    /// the browse view expects.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for an empty name or category, a negative or
    /// non-decimal price, a malformed timestamp, or an unresolvable image
    /// path.
    pub fn into_product(self, assets_base: &Url) -> Result<Product, ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::MissingField {
                id: self.id,
                field: "name",
            });
        }
        if self.category.trim().is_empty() {
            return Err(ParseError::MissingField {
                id: self.id,
                field: "category",
            });
        }

        let price = Decimal::from_f64(self.price)
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| ParseError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            })?
            .round_dp(3);

        let created_at: DateTime<Utc> = self
            .created_at
            .parse()
            .map_err(|_| ParseError::InvalidTimestamp {
                id: self.id.clone(),
                value: self.created_at.clone(),
            })?;

        let mut images = Vec::with_capacity(self.images.len());
        for image in self.images {
            let url = assets_base
                .join(&image.url)
                .map_err(|_| ParseError::InvalidImageUrl {
                    id: self.id.clone(),
                    path: image.url.clone(),
                })?;
            images.push(url.into());
        }

        let colors = self
            .colors
            .into_iter()
            .filter_map(RawColor::into_label)
            .collect();

        let category_id = CategoryId::new(self.category.clone());

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            price,
            category_id: category_id.clone(),
            category: Some(Category {
                id: category_id,
                name: self.category,
                image_url: String::new(),
                created_at,
            }),
            images,
            sizes: self.sizes,
            colors,
            rating: self.rating.map_or(Rating::Five, Rating::from_value),
            stock_quantity: self.stock.unwrap_or(0),
            is_featured: self.is_featured,
            is_new: self.is_new,
            created_at,
        })
    }
}

/// Parse a full product listing, failing on the first invalid record.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first record that fails validation.
pub fn parse_products(raw: Vec<RawProduct>, assets_base: &Url) -> Result<Vec<Product>, ParseError> {
    raw.into_iter()
        .map(|p| p.into_product(assets_base))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assets_base() -> Url {
        Url::parse("http://localhost:5000").unwrap()
    }

    fn raw_json(price: &str, colors: &str) -> String {
        format!(
            r#"{{
                "_id": "66b2f1a9c4",
                "name": "Veste en velours",
                "description": "Veste douce en velours cotele",
                "price": {price},
                "category": "unisexe",
                "colors": {colors},
                "sizes": ["S", "M"],
                "images": [{{"url": "/uploads/veste.jpg", "alt": "Veste"}}],
                "stock": 12,
                "is_featured": true,
                "createdAt": "2024-06-01T10:00:00Z"
            }}"#
        )
    }

    #[test]
    fn test_full_document_maps_completely() {
        let raw: RawProduct =
            serde_json::from_str(&raw_json("89.9", r#"["Noir", "Bordeaux"]"#)).unwrap();
        let product = raw.into_product(&assets_base()).unwrap();

        assert_eq!(product.id.as_str(), "66b2f1a9c4");
        assert_eq!(product.price, Decimal::new(899, 1));
        assert_eq!(product.category_id.as_str(), "unisexe");
        assert_eq!(product.colors, vec!["Noir", "Bordeaux"]);
        assert_eq!(
            product.images,
            vec!["http://localhost:5000/uploads/veste.jpg"]
        );
        assert_eq!(product.stock_quantity, 12);
        assert!(product.is_featured);
        assert_eq!(product.rating, Rating::Five);
    }

    #[test]
    fn test_swatch_object_colors() {
        let colors = r##"[{"name": "Marine", "code": "#000080"}, {"code": "#800020"}]"##;
        let raw: RawProduct = serde_json::from_str(&raw_json("10", colors)).unwrap();
        let product = raw.into_product(&assets_base()).unwrap();

        assert_eq!(product.colors, vec!["Marine", "#800020"]);
    }

    #[test]
    fn test_price_rounds_to_millimes() {
        let raw: RawProduct = serde_json::from_str(&raw_json("89.9004", "[]")).unwrap();
        let product = raw.into_product(&assets_base()).unwrap();
        assert_eq!(product.price, Decimal::new(89_900, 3));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let raw: RawProduct = serde_json::from_str(&raw_json("-5.0", "[]")).unwrap();
        assert!(matches!(
            raw.into_product(&assets_base()),
            Err(ParseError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let json = raw_json("10", "[]").replace("2024-06-01T10:00:00Z", "yesterday");
        let raw: RawProduct = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            raw.into_product(&assets_base()),
            Err(ParseError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_missing_stock_defaults_to_zero() {
        let json = raw_json("10", "[]").replace(r#""stock": 12,"#, "");
        let raw: RawProduct = serde_json::from_str(&json).unwrap();
        let product = raw.into_product(&assets_base()).unwrap();
        assert_eq!(product.stock_quantity, 0);
        assert!(!product.in_stock());
    }

    #[test]
    fn test_listing_fails_on_first_invalid_record() {
        let good: RawProduct = serde_json::from_str(&raw_json("10", "[]")).unwrap();
        let bad: RawProduct = serde_json::from_str(&raw_json("-1", "[]")).unwrap();
        let result = parse_products(vec![good, bad], &assets_base());
        assert!(result.is_err());
    }
}
