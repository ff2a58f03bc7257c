//! Catalog browsing commands.

use std::error::Error;

use rust_decimal::Decimal;

use velours_core::{Product, ProductId, format_amount};
use velours_storefront::catalog::{self, CategoryFilter, FilterState, SortKey};

use super::context;

/// List products the way the category browse view would render them.
pub async fn list(
    category: &str,
    search: Option<&str>,
    sort: &str,
    filters: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;

    let category = CategoryFilter::from_token(category);
    let products = ctx.api.products(category.backend_param()).await?;

    let mut state = FilterState::from_query(category, filters.unwrap_or(""));
    if let Some(term) = search {
        state.set_search(term);
    }
    if let Some(sort) = SortKey::parse(sort) {
        state.sort = sort;
    }

    let catalog_max = products
        .iter()
        .map(|p| p.price)
        .max()
        .unwrap_or(Decimal::ZERO);
    state.widen_max(catalog_max);

    let page = catalog::browse(&products, &state);

    if page.is_empty() {
        let empty = state.category.empty_state();
        println!("{}", empty.title);
        println!("{}", empty.body);
        return Ok(());
    }

    for product in page.all() {
        print_row(product);
    }
    println!("{} produit(s)", page.total());

    let facets = catalog::available_facets(&products, &state);
    if !facets.colors.is_empty() {
        println!("Couleurs disponibles : {}", facets.colors.join(", "));
    }
    if !facets.sizes.is_empty() {
        println!("Tailles disponibles : {}", facets.sizes.join(", "));
    }

    Ok(())
}

/// Show one product in full.
pub async fn show(id: &str) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let product = ctx.api.product(&ProductId::new(id)).await?;

    println!("{} - {}", product.name, product.price_display());
    println!("{}", product.description);
    println!("Catégorie : {}", product.category_id);
    println!("Tailles   : {}", product.sizes.join(", "));
    println!("Couleurs  : {}", product.colors.join(", "));
    println!("Stock     : {}", product.stock_quantity);
    for image in &product.images {
        println!("Image     : {image}");
    }
    Ok(())
}

/// Show the best-seller shelf.
pub async fn best(limit: Option<u32>) -> Result<(), Box<dyn Error>> {
    let ctx = context()?;
    let products = ctx.api.best_products(limit).await?;

    for product in &products {
        print_row(product);
    }
    println!("{} produit(s)", products.len());
    Ok(())
}

fn print_row(product: &Product) {
    println!(
        "{:<26} {:<30} {:>14}  [{}]",
        product.id,
        product.name,
        format_amount(product.price),
        product.category_id
    );
}
