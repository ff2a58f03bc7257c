//! Back-office commands.

use std::error::Error;

use velours_admin::{AdminClient, AdminConfig};
use velours_core::{OrderId, format_amount};

/// Log into the back office.
pub async fn login(email: &str, password: &str) -> Result<AdminClient, Box<dyn Error>> {
    let config = AdminConfig::from_env()?;
    let client = AdminClient::new(&config);
    let user = client.login(email, password).await?;
    tracing::info!(role = %user.role, "logged in as {}", user.full_name);
    Ok(client)
}

/// Print the dashboard statistics.
pub async fn stats(client: &AdminClient) -> Result<(), Box<dyn Error>> {
    let stats = client.stats().await?;
    println!("Commandes : {}", stats.orders_count);
    println!("Produits  : {}", stats.products_count);
    println!("Revenu    : {}", format_amount(stats.total_revenue));
    Ok(())
}

/// Print every order.
pub async fn orders(client: &AdminClient) -> Result<(), Box<dyn Error>> {
    let orders = client.orders().await?;

    for order in &orders {
        println!(
            "{:<26} {:<24} {:<10} {:>14}  {}",
            order.id,
            order.user_full_name,
            order.status,
            format_amount(order.total_amount),
            order.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!("{} commande(s)", orders.len());
    Ok(())
}

/// Approve a pending order.
pub async fn approve_order(client: &AdminClient, id: &str) -> Result<(), Box<dyn Error>> {
    client.approve_order(&OrderId::new(id)).await?;
    println!("Commande approuvée : {id}");
    Ok(())
}

/// Reject a pending order.
pub async fn reject_order(client: &AdminClient, id: &str) -> Result<(), Box<dyn Error>> {
    client.reject_order(&OrderId::new(id)).await?;
    println!("Commande rejetée : {id}");
    Ok(())
}

/// Print the admin accounts.
pub async fn users(client: &AdminClient) -> Result<(), Box<dyn Error>> {
    let users = client.users().await?;

    for user in &users {
        println!(
            "{:<26} {:<28} {:<12} {}",
            user.id,
            user.email,
            user.role,
            if user.is_approved { "approuvé" } else { "en attente" }
        );
    }
    println!("{} compte(s)", users.len());
    Ok(())
}
