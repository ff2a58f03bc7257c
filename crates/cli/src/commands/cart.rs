//! Cart commands, backed by the persisted store.

use std::error::Error;
use std::sync::Arc;

use velours_core::{CartItemId, ProductId, format_amount};
use velours_storefront::stores::CartStore;

use super::context;

/// Fetch the product and add the combination to the cart.
pub async fn add(
    product_id: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let product = ctx.api.product(&ProductId::new(product_id)).await?;

    let mut cart = CartStore::load(Arc::clone(&ctx.storage));
    let outcome = cart.add(&product, size, color, quantity)?;

    if let Some(message) = outcome.message() {
        println!("{message}");
    }
    println!(
        "{} article(s), total {}",
        cart.total_items(),
        format_amount(cart.total_price())
    );
    Ok(())
}

/// Print the cart lines and derived totals.
pub fn list() -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let cart = CartStore::load(ctx.storage);

    if cart.is_empty() {
        println!("Le panier est vide.");
        return Ok(());
    }

    for item in cart.items() {
        println!(
            "{:<50} {} | {} | x{} {:>14}",
            item.id,
            item.size,
            item.color,
            item.quantity,
            format_amount(item.line_total())
        );
    }
    println!(
        "{} article(s), total {}",
        cart.total_items(),
        format_amount(cart.total_price())
    );
    Ok(())
}

/// Set a line's quantity (0 removes it).
pub fn update(item_id: &str, quantity: u32) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let mut cart = CartStore::load(ctx.storage);
    cart.update_quantity(&CartItemId::new(item_id), quantity)?;
    println!(
        "{} article(s), total {}",
        cart.total_items(),
        format_amount(cart.total_price())
    );
    Ok(())
}

/// Remove a line.
pub fn remove(item_id: &str) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let mut cart = CartStore::load(ctx.storage);
    cart.remove(&CartItemId::new(item_id))?;
    println!("{} article(s) restant(s)", cart.total_items());
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let mut cart = CartStore::load(ctx.storage);
    cart.clear()?;
    println!("Panier vidé.");
    Ok(())
}
