//! Velours Core - Shared types library.
//!
//! This crate provides common types used across all Velours components:
//! - `storefront` - Shopper-facing client (catalog, cart, favorites, checkout)
//! - `admin` - Back-office client (products, orders, users)
//! - `cli` - Command-line front end for both clients
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, color swatches, statuses, and
//!   the catalog/cart/order domain records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
