//! Éclat Essence storefront library.
//!
//! Cart, pricing, session and checkout logic for the fragrance storefront,
//! backed by a pair of key-value stores: a durable one for the cart, accounts
//! and the last order, and a per-browsing-session one for transient flags.
//!
//! # Modules
//!
//! - [`storage`] - Key-value stores (in-memory and JSON file)
//! - [`models`] - Stored records: cart lines, accounts, orders
//! - [`services`] - Pricing, cart, auth, checkout, catalog, loader and music
//! - [`pages`] - Page controllers returning views or navigation outcomes
//! - [`filters`] - Display formatting for prices and dates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod pages;
pub mod services;
pub mod state;
pub mod storage;
