//! Status enums for checkout.

use serde::{Deserialize, Serialize};

/// How the shopper chose to pay at checkout.
///
/// Serialized in lowercase (`"card"`, `"paypal"`, `"upi"`, `"cod"`), the
/// values stored in the order snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card. The only method with extra required fields.
    #[default]
    Card,
    PayPal,
    Upi,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    /// All payment methods in checkout form order.
    pub const ALL: [Self; 4] = [Self::Card, Self::PayPal, Self::Upi, Self::Cod];

    /// Stable identifier used in storage and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayPal => "paypal",
            Self::Upi => "upi",
            Self::Cod => "cod",
        }
    }

    /// Human-readable label shown on the receipt.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::PayPal => "PayPal",
            Self::Upi => "UPI Payment",
            Self::Cod => "Cash on Delivery",
        }
    }

    /// Whether card details must accompany this method.
    #[must_use]
    pub const fn requires_card_details(&self) -> bool {
        matches!(self, Self::Card)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::PayPal),
            "upi" => Ok(Self::Upi),
            "cod" => Ok(Self::Cod),
            other => Err(format!(
                "unknown payment method: {other} (expected card, paypal, upi or cod)"
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trips_through_str() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::PayPal).unwrap(),
            "\"paypal\""
        );
        let cod: PaymentMethod = serde_json::from_str("\"cod\"").unwrap();
        assert_eq!(cod, PaymentMethod::Cod);
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Card.label(), "Credit/Debit Card");
        assert_eq!(PaymentMethod::Upi.label(), "UPI Payment");
        assert_eq!(PaymentMethod::Cod.label(), "Cash on Delivery");
    }

    #[test]
    fn test_only_card_requires_details() {
        assert!(PaymentMethod::Card.requires_card_details());
        assert!(!PaymentMethod::PayPal.requires_card_details());
        assert!(!PaymentMethod::Upi.requires_card_details());
        assert!(!PaymentMethod::Cod.requires_card_details());
    }
}
