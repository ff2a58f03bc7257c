//! Client-side persistent collections.
//!
//! The cart and favorites stores are the single source of truth for their
//! collections. Each store rehydrates once from storage at construction
//! and writes the whole collection back after every mutation
//! (write-through, no batching). A stored payload that no longer
//! deserializes is discarded with a warning and the store starts empty.

mod cart;
mod favorites;

pub use cart::{CartOutcome, CartStore};
pub use favorites::FavoritesStore;

use tracing::warn;

use crate::storage::StorageBackend;

/// Rehydrate a JSON collection from storage.
///
/// Missing keys, read failures, and undecodable payloads all produce an
/// empty collection - read failures and corrupt payloads additionally log
/// a warning. Local state is never worth failing startup over.
fn rehydrate<T: serde::de::DeserializeOwned>(storage: &dyn StorageBackend, key: &str) -> Vec<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted collection");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable persisted collection");
            Vec::new()
        }
    }
}
