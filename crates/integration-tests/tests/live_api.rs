//! Network tests against a running backend.
//!
//! These tests require:
//! - The backend running at `VELOURS_API_URL` (default <http://localhost:5000>)
//! - Seeded products
//! - Admin credentials in `VELOURS_ADMIN_EMAIL` / `VELOURS_ADMIN_PASSWORD`
//!   for the back-office tests
//!
//! Run with: `cargo test -p velours-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use velours_admin::{AdminClient, AdminConfig};
use velours_integration_tests::{cleanup, temp_storage};
use velours_storefront::api::ApiClient;
use velours_storefront::catalog::{self, CategoryFilter, FilterState};
use velours_storefront::config::StorefrontConfig;
use velours_storefront::session::Session;

fn storefront_client() -> (ApiClient, std::path::PathBuf) {
    let config = StorefrontConfig::from_env().expect("storefront config");
    let (storage, dir) = temp_storage();
    let session = Session::new(Arc::clone(&storage));
    (ApiClient::new(&config, session), dir)
}

#[tokio::test]
#[ignore = "Requires a running backend with seeded products"]
async fn test_product_listing_parses_and_browses() {
    let (api, dir) = storefront_client();

    let products = api.products(None).await.expect("product listing");
    assert!(!products.is_empty(), "expected seeded products");

    // Every parsed product satisfies the boundary invariants.
    for product in &products {
        assert!(!product.name.is_empty());
        assert!(!product.price.is_sign_negative());
    }

    // The browse engine runs over live data without panicking.
    let state = FilterState::for_category(CategoryFilter::All);
    let page = catalog::browse(&products, &state);
    assert_eq!(page.total(), products.len());

    cleanup(&dir);
}

#[tokio::test]
#[ignore = "Requires a running backend with seeded products"]
async fn test_product_detail_matches_listing() {
    let (api, dir) = storefront_client();

    let products = api.products(None).await.expect("product listing");
    let first = products.first().expect("seeded products");

    let detail = api.product(&first.id).await.expect("product detail");
    assert_eq!(detail.id, first.id);
    assert_eq!(detail.name, first.name);

    cleanup(&dir);
}

#[tokio::test]
#[ignore = "Requires a running backend"]
async fn test_best_products_respects_limit() {
    let (api, dir) = storefront_client();

    let best = api.best_products(Some(3)).await.expect("best products");
    assert!(best.len() <= 3);

    cleanup(&dir);
}

#[tokio::test]
#[ignore = "Requires a running backend and admin credentials"]
async fn test_admin_login_and_stats() {
    let email = std::env::var("VELOURS_ADMIN_EMAIL").expect("VELOURS_ADMIN_EMAIL");
    let password = std::env::var("VELOURS_ADMIN_PASSWORD").expect("VELOURS_ADMIN_PASSWORD");

    let client = AdminClient::new(&AdminConfig::from_env().expect("admin config"));
    client.login(&email, &password).await.expect("admin login");
    assert!(client.is_logged_in());

    let stats = client.stats().await.expect("stats");
    assert!(stats.products_count > 0, "expected seeded products");

    let orders = client.orders().await.expect("orders");
    assert_eq!(usize::try_from(stats.orders_count).unwrap(), orders.len());
}

#[tokio::test]
#[ignore = "Requires a running backend"]
async fn test_unauthenticated_admin_call_fails_fast() {
    let client = AdminClient::new(&AdminConfig::from_env().expect("admin config"));
    let result = client.stats().await;
    assert!(matches!(result, Err(velours_admin::AdminError::NotLoggedIn)));
}
