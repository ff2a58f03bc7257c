//! Order placement command.

use std::error::Error;
use std::sync::Arc;

use velours_storefront::checkout::{self, OrderDraft};
use velours_storefront::stores::CartStore;

use super::context;

/// Place the current cart as an order and clear it on success.
pub async fn place(
    name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    postal_code: String,
) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let mut cart = CartStore::load(Arc::clone(&ctx.storage));

    let draft = OrderDraft {
        full_name: name,
        email,
        phone,
        address,
        city,
        postal_code,
    };

    let confirmation = checkout::place_order(&ctx.api, &mut cart, draft).await?;

    match confirmation.id {
        Some(id) => println!("Commande confirmée ! N° de commande : {id}"),
        None => println!("Commande confirmée !"),
    }
    println!("Notre équipe va vous contacter dans les 24 heures pour confirmer votre commande.");
    Ok(())
}
