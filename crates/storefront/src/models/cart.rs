//! Cart data types.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s. Insertion order is display
//! order, and the index of a line is how the cart page addresses it.

use serde::{Deserialize, Serialize};

use eclat_core::{Price, ProductId};

use super::product::Product;

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the base currency.
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub notes: String,
    pub quantity: u32,
}

impl CartLine {
    /// A new line holding one unit of `product`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            notes: product.notes.clone(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// What a quantity update did to the addressed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The index was out of bounds; nothing changed.
    Unchanged,
    /// The line now holds this many units.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
}

/// The shopper's cart.
///
/// Holds at most one line per product id. Deserializing a stored cart merges
/// duplicate ids and drops zero-quantity lines, so a hand-edited store cannot
/// break those rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Add one unit of `product`, merging into an existing line with the same id.
    ///
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Change the quantity of the line at `index` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. An out-of-bounds
    /// index is ignored.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> QuantityChange {
        let Some(line) = self.lines.get_mut(index) else {
            return QuantityChange::Unchanged;
        };

        let next = i64::from(line.quantity).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Remove the line at `index`, returning it. Out of bounds is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(raw: Vec<CartLine>) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(raw.len());
        for line in raw.into_iter().filter(|line| line.quantity > 0) {
            match lines.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }
        Self { lines }
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
