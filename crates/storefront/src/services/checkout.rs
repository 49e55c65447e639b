//! Checkout and order submission.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use eclat_core::{Email, OrderNumber, PaymentMethod};

use crate::models::{CustomerDetails, Order, keys};
use crate::services::cart::{CartError, CartService};
use crate::state::AppState;
use crate::storage::StorageError;

/// Errors from submitting an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required customer field was left blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The contact email is not a valid address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] eclat_core::EmailError),

    /// Card payment without all four card fields.
    #[error("card details are incomplete")]
    MissingCardDetails,

    /// Reading the cart or writing the order failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CartError> for CheckoutError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Storage(inner) => Self::Storage(inner),
            // Loading and clearing the cart never checks the session.
            CartError::LoginRequired => Self::EmptyCart,
        }
    }
}

/// Card fields submitted with a card payment.
///
/// Checked for presence only and never stored.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: SecretString,
    pub holder: String,
    pub expiry: String,
    pub cvv: SecretString,
}

impl CardDetails {
    fn is_complete(&self) -> bool {
        [
            self.number.expose_secret(),
            self.holder.as_str(),
            self.expiry.as_str(),
            self.cvv.expose_secret(),
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// The checkout form as submitted.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    pub card: Option<CardDetails>,
}

impl CheckoutForm {
    /// Validate the customer fields and payment details.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a blank required field, an invalid
    /// email, or incomplete card details for a card payment.
    pub fn validate(&self) -> Result<CustomerDetails, CheckoutError> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("country", &self.country),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(*field));
        }

        let email = Email::parse(self.email.trim())?;

        if self.payment_method.requires_card_details()
            && !self.card.as_ref().is_some_and(CardDetails::is_complete)
        {
            return Err(CheckoutError::MissingCardDetails);
        }

        Ok(CustomerDetails {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            zip: self.zip.trim().to_owned(),
            country: self.country.trim().to_owned(),
        })
    }
}

/// Checkout service.
pub struct CheckoutService<'a> {
    state: &'a AppState,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Submit the current cart as an order placed now.
    ///
    /// # Errors
    ///
    /// See [`Self::submit_order_at`].
    pub fn submit_order(&self, form: &CheckoutForm) -> Result<Order, CheckoutError> {
        self.submit_order_at(form, Utc::now())
    }

    /// Submit the current cart as an order placed at `submitted_at`.
    ///
    /// The order is written to the last-order slot, replacing any previous
    /// one, and the cart is emptied afterwards.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to order, or a
    /// validation error from [`CheckoutForm::validate`]. No order is written
    /// in either case.
    #[instrument(skip(self, form), fields(payment_method = %form.payment_method))]
    pub fn submit_order_at(
        &self,
        form: &CheckoutForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        let cart = CartService::load(self.state)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer = form.validate()?;

        let order = Order {
            customer,
            payment_method: form.payment_method,
            cart: cart.cart().clone(),
            totals: cart.totals(),
            order_date: submitted_at,
            order_number: OrderNumber::from_timestamp(submitted_at),
        };

        self.state.local().save(keys::LAST_ORDER, &order)?;
        self.state.local().remove(keys::CART)?;

        tracing::info!(
            order_number = %order.order_number,
            items = order.cart.count(),
            total = %order.totals.total,
            "Order placed"
        );
        Ok(order)
    }

    /// The most recent order, if one was placed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Storage` if the store cannot be read.
    pub fn last_order(&self) -> Result<Option<Order>, CheckoutError> {
        Ok(self.state.local().load_or_discard(keys::LAST_ORDER)?)
    }
}

/// Group a card number into blocks of four, ignoring existing whitespace.
///
/// ```
/// use eclat_storefront::services::checkout::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("4111 11"), "4111 11");
/// ```
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format card expiry input as `MM/YY`, dropping non-digits.
///
/// ```
/// use eclat_storefront::services::checkout::format_expiry;
///
/// assert_eq!(format_expiry("1228"), "12/28");
/// assert_eq!(format_expiry("1"), "1");
/// ```
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 2 {
        return digits;
    }

    let (month, year) = digits.split_at(2);
    let year: String = year.chars().take(2).collect();
    format!("{month}/{year}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eclat_core::{Price, ProductId};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::models::Product;
    use crate::services::auth::AuthService;

    fn form(method: PaymentMethod) -> CheckoutForm {
        CheckoutForm {
            first_name: "Ava".to_owned(),
            last_name: "Sharma".to_owned(),
            email: "ava@mail.com".to_owned(),
            phone: "9876543210".to_owned(),
            address: "12 MG Road".to_owned(),
            city: "Pune".to_owned(),
            state: "MH".to_owned(),
            zip: "411001".to_owned(),
            country: "India".to_owned(),
            payment_method: method,
            card: None,
        }
    }

    fn card() -> CardDetails {
        CardDetails {
            number: SecretString::from("4111 1111 1111 1111"),
            holder: "Ava Sharma".to_owned(),
            expiry: "12/28".to_owned(),
            cvv: SecretString::from("123"),
        }
    }

    fn state_with_cart() -> AppState {
        let state = AppState::in_memory(StorefrontConfig::default());
        let auth = AuthService::new(&state);
        let password = SecretString::from("rosewater");
        auth.signup("Ava", "ava@mail.com", &password).unwrap();
        auth.login("ava@mail.com", &password).unwrap();

        let mut cart = CartService::load(&state).unwrap();
        let product = Product {
            id: ProductId::new("p1"),
            name: "Oud Royale".to_owned(),
            price: Price::from_cents(1000),
            image: String::new(),
            notes: String::new(),
            category: "men".to_owned(),
        };
        for _ in 0..4 {
            cart.add(&product).unwrap();
        }
        state
    }

    #[test]
    fn test_submit_order_snapshots_and_clears_cart() {
        let state = state_with_cart();
        let at = DateTime::from_timestamp_millis(1_760_000_000_123).unwrap();

        let order = CheckoutService::new(&state)
            .submit_order_at(&form(PaymentMethod::Cod), at)
            .unwrap();

        assert_eq!(order.order_number.as_str(), "EC1760000000123");
        assert_eq!(order.cart.count(), 4);
        assert_eq!(order.totals.total, Price::from_cents(4460));
        assert!(CartService::load(&state).unwrap().is_empty());
        assert_eq!(
            CheckoutService::new(&state).last_order().unwrap(),
            Some(order)
        );
    }

    #[test]
    fn test_empty_cart_creates_no_order() {
        let state = AppState::in_memory(StorefrontConfig::default());
        let result = CheckoutService::new(&state).submit_order(&form(PaymentMethod::Upi));

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(state.local().raw(keys::LAST_ORDER).unwrap(), None);
    }

    #[test]
    fn test_card_requires_all_details() {
        let state = state_with_cart();
        let checkout = CheckoutService::new(&state);

        let mut submitted = form(PaymentMethod::Card);
        assert!(matches!(
            checkout.submit_order(&submitted),
            Err(CheckoutError::MissingCardDetails)
        ));

        let mut partial = card();
        partial.cvv = SecretString::from("");
        submitted.card = Some(partial);
        assert!(matches!(
            checkout.submit_order(&submitted),
            Err(CheckoutError::MissingCardDetails)
        ));
        assert!(!CartService::load(&state).unwrap().is_empty());

        submitted.card = Some(card());
        let order = checkout.submit_order(&submitted).unwrap();
        assert_eq!(order.payment_method, PaymentMethod::Card);

        let stored = state.local().raw(keys::LAST_ORDER).unwrap().unwrap();
        assert!(!stored.contains("4111"));
    }

    #[test]
    fn test_blank_field_is_reported() {
        let state = state_with_cart();
        let mut submitted = form(PaymentMethod::PayPal);
        submitted.city = "  ".to_owned();

        assert!(matches!(
            CheckoutService::new(&state).submit_order(&submitted),
            Err(CheckoutError::MissingField("city"))
        ));
    }

    #[test]
    fn test_invalid_email_is_reported() {
        let state = state_with_cart();
        let mut submitted = form(PaymentMethod::PayPal);
        submitted.email = "ava at mail".to_owned();

        assert!(matches!(
            CheckoutService::new(&state).submit_order(&submitted),
            Err(CheckoutError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_new_order_replaces_previous() {
        let state = state_with_cart();
        let checkout = CheckoutService::new(&state);
        let first_at = DateTime::from_timestamp_millis(1_000).unwrap();
        checkout
            .submit_order_at(&form(PaymentMethod::Upi), first_at)
            .unwrap();

        let mut cart = CartService::load(&state).unwrap();
        let product = Product {
            id: ProductId::new("p2"),
            name: "Rose Noir".to_owned(),
            price: Price::from_cents(8000),
            image: String::new(),
            notes: String::new(),
            category: "women".to_owned(),
        };
        cart.add(&product).unwrap();
        let second_at = DateTime::from_timestamp_millis(2_000).unwrap();
        checkout
            .submit_order_at(&form(PaymentMethod::Upi), second_at)
            .unwrap();

        let last = checkout.last_order().unwrap().unwrap();
        assert_eq!(last.order_number.as_str(), "EC2000");
        assert!(last.totals.ships_free());
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111 1111 11111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("12/2"), "12/2");
        assert_eq!(format_expiry("0730"), "07/30");
        assert_eq!(format_expiry("073099"), "07/30");
        assert_eq!(format_expiry("ab"), "");
    }
}
