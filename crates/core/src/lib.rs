//! Éclat Core - Shared types library.
//!
//! This crate provides common types used across all storefront components:
//! - `storefront` - Cart, pricing, session and checkout logic
//! - `cli` - Command-line shell driving the storefront against a local store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, order numbers, prices,
//!   emails, payment methods and password digests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
