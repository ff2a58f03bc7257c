//! Favorites commands, backed by the persisted store.

use std::error::Error;
use std::sync::Arc;

use velours_core::ProductId;
use velours_storefront::stores::FavoritesStore;

use super::context;

/// Fetch the product and favorite it.
pub async fn add(product_id: &str) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let product = ctx.api.product(&ProductId::new(product_id)).await?;

    let mut favorites = FavoritesStore::load(Arc::clone(&ctx.storage));
    if favorites.add(&product)? {
        println!("Ajouté aux favoris : {}", product.name);
    } else {
        println!("Déjà dans les favoris : {}", product.name);
    }
    Ok(())
}

/// Unfavorite a product.
pub fn remove(product_id: &str) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let mut favorites = FavoritesStore::load(ctx.storage);
    favorites.remove(&ProductId::new(product_id))?;
    println!("{} favori(s)", favorites.len());
    Ok(())
}

/// Print the favorited products.
pub fn list() -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let favorites = FavoritesStore::load(ctx.storage);

    if favorites.is_empty() {
        println!("Aucun favori.");
        return Ok(());
    }

    for product in favorites.products() {
        println!("{:<26} {:<30} {}", product.id, product.name, product.price_display());
    }
    Ok(())
}
