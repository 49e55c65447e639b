//! Domain models for the storefront.
//!
//! Everything here is a plain data type persisted as JSON in the local store,
//! using the camelCase field names the browser pages have always written.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine, QuantityChange};
pub use order::{CustomerDetails, Order};
pub use product::Product;
pub use session::{CurrentUser, keys};
pub use user::RegisteredUser;
