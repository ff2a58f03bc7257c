//! Shared domain types.

mod cart;
mod color;
mod email;
mod id;
mod order;
mod price;
mod product;
mod status;
mod user;

pub use cart::{CartItem, FavoriteEntry};
pub use color::{DEFAULT_SWATCH, color_to_hex};
pub use email::{Email, EmailError};
pub use id::{CartItemId, CategoryId, OrderId, ProductId, UserId};
pub use order::{Order, OrderItem};
pub use price::{CurrencyCode, Price, format_amount};
pub use product::{Category, Product};
pub use status::{OrderStatus, Rating, UserRole};
pub use user::User;
