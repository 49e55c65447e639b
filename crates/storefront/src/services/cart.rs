//! Cart service.
//!
//! Loads the cart from the local store, applies one mutation at a time and
//! writes the full cart back before returning.

use thiserror::Error;
use tracing::instrument;

use crate::models::{Cart, CartLine, Product, QuantityChange, keys};
use crate::services::auth::{AuthError, AuthService};
use crate::services::pricing::{Totals, compute_totals};
use crate::state::AppState;
use crate::storage::StorageError;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Adding to the cart requires a logged-in shopper.
    #[error("login required to add items to the cart")]
    LoginRequired,

    /// Reading or writing the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<AuthError> for CartError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(inner) => Self::Storage(inner),
            _ => Self::LoginRequired,
        }
    }
}

/// The shopper's cart, synced to the local store.
pub struct CartService<'a> {
    state: &'a AppState,
    cart: Cart,
}

impl<'a> CartService<'a> {
    /// Load the stored cart, starting empty if none is stored.
    ///
    /// A malformed stored cart is discarded.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read.
    pub fn load(state: &'a AppState) -> Result<Self, CartError> {
        let cart = state
            .local()
            .load_or_discard::<Cart>(keys::CART)?
            .unwrap_or_default();
        Ok(Self { state, cart })
    }

    /// The loaded cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Summary rows for the current cart.
    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.cart)
    }

    /// Add one unit of `product`. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LoginRequired` when nobody is logged in; the cart
    /// is left untouched.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) -> Result<u32, CartError> {
        if !AuthService::new(self.state).is_logged_in()? {
            return Err(CartError::LoginRequired);
        }

        let quantity = self.cart.add(product);
        self.save()?;

        tracing::debug!(quantity, count = self.cart.count(), "Added to cart");
        Ok(quantity)
    }

    /// Change the quantity of the line at `index` by `delta`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Result<QuantityChange, CartError> {
        let change = self.cart.update_quantity(index, delta);
        if change != QuantityChange::Unchanged {
            self.save()?;
        }
        Ok(change)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    #[instrument(skip(self))]
    pub fn remove(&mut self, index: usize) -> Result<Option<CartLine>, CartError> {
        let removed = self.cart.remove(index);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.cart.clear();
        self.save()
    }

    fn save(&self) -> Result<(), CartError> {
        self.state.local().save(keys::CART, &self.cart)?;
        Ok(())
    }
}
