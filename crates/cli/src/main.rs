//! Velours CLI - headless front end for the storefront and back office.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! vl-cli products list --category nouveautes --search veste --sort price-asc
//!
//! # Drive the cart (persisted under VELOURS_DATA_DIR)
//! vl-cli cart add 66b2f1a9c4 --size M --color Noir --quantity 2
//! vl-cli cart list
//!
//! # Favorites
//! vl-cli favorites add 66b2f1a9c4
//!
//! # Place the order in the cart
//! vl-cli order place --name "Amel Ben Salah" --email amel@example.com \
//!     --phone "+216 22 333 444" --address "12 rue de Carthage" \
//!     --city Tunis --postal-code 1000
//!
//! # Back office
//! vl-cli admin -e admin@example.com -p secret stats
//! ```
//!
//! # Commands
//!
//! - `products` - List, show, and rank catalog products
//! - `cart` - Mutate and inspect the persisted cart
//! - `favorites` - Mutate and inspect the persisted favorites
//! - `order` - Place the current cart as an order
//! - `admin` - Back-office operations (stats, orders, users)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vl-cli")]
#[command(author, version, about = "Velours CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Place orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Back-office operations
    Admin {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products with the browse view's filters applied
    List {
        /// Category token (`all`, `collections`, `nouveautes`,
        /// `meilleures-ventes`, or a raw category id)
        #[arg(long, default_value = "all")]
        category: String,

        /// Free-text search over names, descriptions, and colors
        #[arg(long)]
        search: Option<String>,

        /// Sort order (`name-asc`, `name-desc`, `price-asc`, `price-desc`)
        #[arg(long, default_value = "name-asc")]
        sort: String,

        /// Extra filters as a query string (`colors=Noir&price=0-100`)
        #[arg(long)]
        filters: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Show the best-seller shelf
    Best {
        /// Maximum number of products
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product/size/color combination
    Add {
        /// Product id
        product_id: String,

        /// Size label
        #[arg(long)]
        size: String,

        /// Color label
        #[arg(long)]
        color: String,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// List the cart lines and totals
    List,
    /// Set a line's quantity (0 removes it)
    Update {
        /// Line item id
        item_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Line item id
        item_id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Favorite a product
    Add {
        /// Product id
        product_id: String,
    },
    /// Unfavorite a product
    Remove {
        /// Product id
        product_id: String,
    },
    /// List favorited products
    List,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Place the current cart as an order
    Place {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// City
        #[arg(long)]
        city: String,

        /// Postal code
        #[arg(long)]
        postal_code: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show dashboard statistics
    Stats,
    /// List orders
    Orders,
    /// Approve a pending order
    ApproveOrder {
        /// Order id
        id: String,
    },
    /// Reject a pending order
    RejectOrder {
        /// Order id
        id: String,
    },
    /// List admin accounts
    Users,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                sort,
                filters,
            } => {
                commands::products::list(&category, search.as_deref(), &sort, filters.as_deref())
                    .await?;
            }
            ProductsAction::Show { id } => commands::products::show(&id).await?,
            ProductsAction::Best { limit } => commands::products::best(limit).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                size,
                color,
                quantity,
            } => commands::cart::add(&product_id, &size, &color, quantity).await?,
            CartAction::List => commands::cart::list()?,
            CartAction::Update { item_id, quantity } => {
                commands::cart::update(&item_id, quantity)?;
            }
            CartAction::Remove { item_id } => commands::cart::remove(&item_id)?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::Add { product_id } => commands::favorites::add(&product_id).await?,
            FavoritesAction::Remove { product_id } => commands::favorites::remove(&product_id)?,
            FavoritesAction::List => commands::favorites::list()?,
        },
        Commands::Order { action } => match action {
            OrderAction::Place {
                name,
                email,
                phone,
                address,
                city,
                postal_code,
            } => {
                commands::order::place(name, email, phone, address, city, postal_code).await?;
            }
        },
        Commands::Admin {
            email,
            password,
            action,
        } => {
            let client = commands::admin::login(&email, &password).await?;
            match action {
                AdminAction::Stats => commands::admin::stats(&client).await?,
                AdminAction::Orders => commands::admin::orders(&client).await?,
                AdminAction::ApproveOrder { id } => {
                    commands::admin::approve_order(&client, &id).await?;
                }
                AdminAction::RejectOrder { id } => {
                    commands::admin::reject_order(&client, &id).await?;
                }
                AdminAction::Users => commands::admin::users(&client).await?,
            }
        }
    }
    Ok(())
}
