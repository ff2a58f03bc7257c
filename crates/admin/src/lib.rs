//! Velours Admin - back-office client library.
//!
//! # Architecture
//!
//! The back office drives the same REST backend as the storefront but
//! through privileged endpoints: dashboard stats, order approval, admin
//! user management, and product authoring (multipart upload).
//!
//! Unlike the storefront, the admin session is held in memory only: the
//! [`AdminClient`] logs in, keeps the bearer token for its lifetime, and
//! drops it on a `401`. Form payloads are validated client-side before any
//! network dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! use velours_admin::{AdminClient, AdminConfig};
//!
//! let client = AdminClient::new(&AdminConfig::from_env()?);
//! client.login("admin@example.com", "secret").await?;
//!
//! let stats = client.stats().await?;
//! println!("{} orders, {} products", stats.orders_count, stats.products_count);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod config;
mod error;
mod raw;
mod types;

pub use client::AdminClient;
pub use config::{AdminConfig, ConfigError};
pub use error::AdminError;
pub use raw::ParseError;
pub use types::{AdminStats, AdminUserUpdate, FormError, ImageUpload, NewAdminUser, ProductForm};
