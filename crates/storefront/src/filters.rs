//! Display formatting helpers used by the page views.

use chrono::{DateTime, TimeZone, Utc};

use eclat_core::{DisplayCurrency, Price};

use crate::services::pricing::Totals;

/// Label shown in place of a waived shipping charge.
pub const FREE_SHIPPING_LABEL: &str = "FREE";

/// Format of the order date on the receipt, e.g. `October 19, 2026 at 02:30 PM`.
const ORDER_DATE_FORMAT: &str = "%B %-d, %Y at %I:%M %p";

/// Render a base-unit price in the display currency.
#[must_use]
pub fn price(currency: &DisplayCurrency, amount: Price) -> String {
    currency.format(amount)
}

/// Render the shipping row: "FREE" when waived on a non-empty cart.
#[must_use]
pub fn shipping(currency: &DisplayCurrency, totals: &Totals) -> String {
    if totals.ships_free() {
        FREE_SHIPPING_LABEL.to_string()
    } else {
        currency.format(totals.shipping)
    }
}

/// Render an order date in the shopper's time zone.
#[must_use]
pub fn order_date<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format(ORDER_DATE_FORMAT).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn test_shipping_label() {
        let inr = DisplayCurrency::rupee();

        let empty = Totals::default();
        assert_eq!(shipping(&inr, &empty), "₹0");

        let small = Totals {
            subtotal: Price::from_cents(4000),
            shipping: Price::from_cents(60),
            ..Totals::default()
        };
        assert_eq!(shipping(&inr, &small), "₹50");

        let large = Totals {
            subtotal: Price::from_cents(10000),
            ..Totals::default()
        };
        assert_eq!(shipping(&inr, &large), "FREE");
    }

    #[test]
    fn test_order_date() {
        let date = DateTime::parse_from_rfc3339("2026-10-19T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(order_date(date, &Utc), "October 19, 2026 at 09:00 AM");

        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(order_date(date, &ist), "October 19, 2026 at 02:30 PM");
    }

    #[test]
    fn test_price() {
        assert_eq!(price(&DisplayCurrency::rupee(), Price::from_cents(4460)), "₹3,702");
    }
}
