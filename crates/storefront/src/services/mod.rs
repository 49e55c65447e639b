//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Signup, login, logout and the session gate
//! - `cart` - Cart mutations synced to the local store
//! - `pricing` - Subtotal, shipping, tax and total
//! - `checkout` - Order validation and submission
//! - `catalog` - Product listing, filtering and sorting
//! - `music` - Background music player
//! - `loader` - Once-per-session intro loader flag

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod loader;
pub mod music;
pub mod pricing;
