//! Type-safe price representation using decimal arithmetic.
//!
//! Every amount the storefront stores or computes is a [`Price`] in the base
//! currency unit (US dollars). Conversion into the shopper's display currency
//! happens only when text is produced, through [`DisplayCurrency`]; converted
//! amounts are never stored.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount in the base currency unit.
///
/// Arithmetic saturates at the bounds of [`Decimal`], so an absurd stored
/// amount renders as a huge number instead of aborting.
///
/// Serialized as a plain JSON number so stored carts and orders keep the
/// `price: 129.5` shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero in the base unit.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount in the base unit.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// How the integer part of a display amount is split with commas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigitGrouping {
    /// Last three digits, then pairs: `1,23,45,678` (the `en-IN` locale).
    #[default]
    Indian,
    /// Groups of three: `12,345,678`.
    Western,
}

impl FromStr for DigitGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indian" | "en-in" => Ok(Self::Indian),
            "western" | "en-us" => Ok(Self::Western),
            other => Err(format!("unknown digit grouping: {other}")),
        }
    }
}

/// The currency prices are shown in.
///
/// Amounts are multiplied by a fixed conversion `rate`, rounded to a whole
/// display unit and prefixed with `symbol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCurrency {
    /// Glyph placed before the amount.
    pub symbol: String,
    /// Display units per base unit.
    pub rate: Decimal,
    /// Thousands grouping style.
    pub grouping: DigitGrouping,
}

impl Default for DisplayCurrency {
    fn default() -> Self {
        Self::rupee()
    }
}

impl DisplayCurrency {
    /// Indian rupees at 83 per dollar.
    #[must_use]
    pub fn rupee() -> Self {
        Self {
            symbol: "₹".to_owned(),
            rate: Decimal::from(83),
            grouping: DigitGrouping::Indian,
        }
    }

    /// Convert a base-unit price and render it for display.
    ///
    /// ```
    /// use eclat_core::{DisplayCurrency, Price};
    ///
    /// let inr = DisplayCurrency::rupee();
    /// assert_eq!(inr.format(Price::from_cents(4460)), "₹3,702");
    /// assert_eq!(inr.format(Price::from_cents(200_000)), "₹1,66,000");
    /// ```
    #[must_use]
    pub fn format(&self, price: Price) -> String {
        let converted = price.amount().saturating_mul(self.rate);
        let rounded = converted.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.abs().trunc().to_string();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{}{sign}{}",
            self.symbol,
            group_digits(&digits, self.grouping)
        )
    }
}

/// Insert thousands separators into a run of ASCII digits.
fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let width = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(width);
        groups.push(head.get(start..end).unwrap_or_default());
        end = start;
    }
    groups.reverse();
    groups.push(tail);

    groups.join(",")
}
