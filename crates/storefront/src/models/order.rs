//! Order snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eclat_core::{Email, OrderNumber, PaymentMethod};

use super::cart::Cart;
use crate::services::pricing::Totals;

/// Contact and shipping details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl CustomerDetails {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A submitted order.
///
/// Immutable once written: it holds its own copy of the cart lines and the
/// totals computed at submission, so later cart changes never reach it. Only
/// the most recent order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
    pub cart: Cart,
    pub totals: Totals,
    pub order_date: DateTime<Utc>,
    pub order_number: OrderNumber,
}
