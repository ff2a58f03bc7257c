//! Velours Storefront - shopper-facing client library.
//!
//! # Architecture
//!
//! This crate is the state and API layer behind the shop's UI. It owns:
//!
//! - [`api`] - typed REST client for the backend (products, auth, orders),
//!   with an explicit schema-validated parse step at the boundary and a
//!   5-minute `moka` cache for catalog reads
//! - [`storage`] - write-through key/value persistence (file-backed in
//!   production, in-memory for tests)
//! - [`stores`] - the cart and favorites collections, rehydrated once at
//!   startup and mirrored to storage on every mutation
//! - [`catalog`] - pure filter/sort/facet/pagination engine for the
//!   category browse view
//! - [`session`] - bearer token and user profile persistence; a `401`
//!   from the backend forces a logout
//! - [`checkout`] - order draft validation and submission
//!
//! All store mutations are synchronous; only the network layer is async.
//! The backend stays the source of truth for stock and order state - this
//! crate never re-validates stock levels client-side.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use velours_storefront::api::ApiClient;
//! use velours_storefront::config::StorefrontConfig;
//! use velours_storefront::session::Session;
//! use velours_storefront::storage::FileStorage;
//! use velours_storefront::stores::CartStore;
//!
//! let config = StorefrontConfig::from_env()?;
//! let storage = Arc::new(FileStorage::new(&config.data_dir)?);
//! let session = Session::new(Arc::clone(&storage));
//! let api = ApiClient::new(&config, session);
//!
//! let products = api.products(None).await?;
//! let mut cart = CartStore::load(storage);
//! let outcome = cart.add(&products[0], "M", "Noir", 1)?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod session;
pub mod storage;
pub mod stores;

pub use api::{ApiClient, ApiError};
pub use catalog::{CatalogPage, CategoryFilter, Facets, FilterState, SortKey};
pub use checkout::{CheckoutError, OrderDraft, PlaceOrderError};
pub use config::{ConfigError, StorefrontConfig};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use stores::{CartOutcome, CartStore, FavoritesStore};
