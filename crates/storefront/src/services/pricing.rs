//! Order totals.
//!
//! Pure functions over a [`Cart`]. All arithmetic is exact decimal; nothing
//! is rounded until an amount is formatted for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use eclat_core::Price;

use crate::models::Cart;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(Decimal::from_parts(5000, 0, 0, false, 2));

/// Shipping charged on non-empty carts at or below the threshold.
pub const FLAT_SHIPPING_FEE: Price = Price::new(Decimal::from_parts(60, 0, 0, false, 2));

/// Tax as a fraction of the subtotal. Shipping is not taxed.
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// The four summary rows of a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl Totals {
    /// Whether shipping is waived on a non-empty cart, shown as "FREE".
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero() && !self.subtotal.is_zero()
    }
}

/// Shipping charge for a given subtotal.
#[must_use]
pub fn shipping_for(subtotal: Price) -> Price {
    if subtotal.is_zero() || subtotal > FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Compute subtotal, shipping, tax and total for `cart`.
#[must_use]
pub fn compute_totals(cart: &Cart) -> Totals {
    let subtotal: Price = cart.lines().iter().map(|line| line.line_total()).sum();
    let shipping = shipping_for(subtotal);
    let tax = subtotal * TAX_RATE;

    Totals {
        subtotal,
        shipping,
        tax,
        total: subtotal + shipping + tax,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eclat_core::ProductId;

    use super::*;
    use crate::models::Product;

    fn cart_of(items: &[(&str, i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (id, cents, quantity) in items {
            let product = Product {
                id: ProductId::new(*id),
                name: (*id).to_owned(),
                price: Price::from_cents(*cents),
                image: String::new(),
                notes: String::new(),
                category: String::new(),
            };
            for _ in 0..*quantity {
                cart.add(&product);
            }
        }
        cart
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = compute_totals(&Cart::new());
        assert_eq!(totals, Totals::default());
        assert!(!totals.ships_free());
    }

    #[test]
    fn test_small_order_pays_flat_shipping() {
        let totals = compute_totals(&cart_of(&[("p1", 1000, 4)]));
        assert_eq!(totals.subtotal, Price::from_cents(4000));
        assert_eq!(totals.shipping, Price::from_cents(60));
        assert_eq!(totals.tax, Price::from_cents(400));
        assert_eq!(totals.total, Price::from_cents(4460));
        assert!(!totals.ships_free());
    }

    #[test]
    fn test_large_order_ships_free() {
        let totals = compute_totals(&cart_of(&[("p1", 2500, 2), ("p2", 5000, 1)]));
        assert_eq!(totals.subtotal, Price::from_cents(10000));
        assert_eq!(totals.shipping, Price::ZERO);
        assert_eq!(totals.tax, Price::from_cents(1000));
        assert_eq!(totals.total, Price::from_cents(11000));
        assert!(totals.ships_free());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(shipping_for(Price::from_cents(5000)), FLAT_SHIPPING_FEE);
        assert_eq!(shipping_for(Price::from_cents(5001)), Price::ZERO);
        assert_eq!(shipping_for(Price::from_cents(1)), FLAT_SHIPPING_FEE);
    }

    #[test]
    fn test_constants() {
        assert_eq!(FREE_SHIPPING_THRESHOLD, Price::from_cents(5000));
        assert_eq!(FLAT_SHIPPING_FEE, Price::from_cents(60));
        assert_eq!(TAX_RATE.to_string(), "0.1");
    }

    #[test]
    fn test_tax_is_not_rounded() {
        let totals = compute_totals(&cart_of(&[("p1", 1999, 1)]));
        assert_eq!(totals.tax.amount().to_string(), "1.999");
    }
}
