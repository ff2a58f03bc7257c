//! Cart and favorites flows over file-backed storage.
//!
//! These tests exercise the same write-through path the UI uses: every
//! mutation lands on disk, and a fresh store over the same directory sees
//! the result.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;

use velours_core::ProductId;
use velours_integration_tests::{cleanup, product, temp_storage};
use velours_storefront::storage::{StorageBackend, keys};
use velours_storefront::stores::{CartOutcome, CartStore, FavoritesStore};

#[test]
fn test_cart_flow_survives_reload() {
    let (storage, dir) = temp_storage();
    let veste = product("p1", "Veste en velours", 90, "unisexe");
    let pull = product("p2", "Pull cotele", 60, "unisexe");

    {
        let mut cart = CartStore::load(Arc::clone(&storage));
        cart.add(&veste, "M", "Noir", 2).unwrap();
        cart.add(&pull, "S", "Blanc", 1).unwrap();
        // Same combination again: merges instead of duplicating.
        let outcome = cart.add(&veste, "M", "Noir", 1).unwrap();
        assert!(matches!(outcome, CartOutcome::QuantityUpdated { .. }));
    }

    let mut cart = CartStore::load(Arc::clone(&storage));
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.total_items(), 4);
    assert_eq!(cart.total_price(), Decimal::from(330));

    // updateQuantity(id, 0) behaves exactly like remove(id).
    let id = cart.items()[0].id.clone();
    cart.update_quantity(&id, 0).unwrap();
    assert_eq!(cart.items().len(), 1);

    let reloaded = CartStore::load(Arc::clone(&storage));
    assert_eq!(reloaded.items().len(), 1);
    assert_eq!(reloaded.items()[0].product_id, ProductId::new("p2"));

    cleanup(&dir);
}

#[test]
fn test_cart_and_favorites_keys_are_independent() {
    let (storage, dir) = temp_storage();
    let veste = product("p1", "Veste en velours", 90, "unisexe");

    let mut cart = CartStore::load(Arc::clone(&storage));
    let mut favorites = FavoritesStore::load(Arc::clone(&storage));

    cart.add(&veste, "M", "Noir", 1).unwrap();
    favorites.add(&veste).unwrap();
    cart.clear().unwrap();

    // Clearing the cart leaves favorites untouched.
    let favorites = FavoritesStore::load(Arc::clone(&storage));
    assert!(favorites.is_favorite(&ProductId::new("p1")));

    cleanup(&dir);
}

#[test]
fn test_favorites_round_trip() {
    let (storage, dir) = temp_storage();
    let pull = product("p2", "Pull cotele", 60, "unisexe");

    let mut favorites = FavoritesStore::load(Arc::clone(&storage));
    assert!(favorites.add(&pull).unwrap());
    assert!(favorites.is_favorite(&pull.id));
    assert!(!favorites.add(&pull).unwrap());
    assert_eq!(favorites.len(), 1);

    favorites.remove(&pull.id).unwrap();
    assert!(!favorites.is_favorite(&pull.id));

    let reloaded = FavoritesStore::load(Arc::clone(&storage));
    assert!(reloaded.is_empty());

    cleanup(&dir);
}

#[test]
fn test_corrupt_cart_file_resets_to_empty() {
    let (storage, dir) = temp_storage();

    storage.set(keys::CART, "{\"schema\": \"from-the-future\"}").unwrap();
    let cart = CartStore::load(Arc::clone(&storage));
    assert!(cart.is_empty());

    // The favorites key is unaffected by the cart's bad payload.
    storage.set(keys::FAVORITES, "[]").unwrap();
    let favorites = FavoritesStore::load(Arc::clone(&storage));
    assert!(favorites.is_empty());

    cleanup(&dir);
}

#[test]
fn test_sequential_adds_accumulate_one_line() {
    let (storage, dir) = temp_storage();
    let veste = product("p1", "Veste en velours", 90, "unisexe");

    let mut cart = CartStore::load(Arc::clone(&storage));
    for _ in 0..5 {
        cart.add(&veste, "L", "Noir", 1).unwrap();
    }

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 5);
    assert_eq!(cart.total_price(), Decimal::from(450));

    cleanup(&dir);
}
