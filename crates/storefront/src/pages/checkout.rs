//! Checkout page.
//!
//! Submitting the form writes the order immediately; the shopper then sees a
//! short processing state before landing on the receipt.

use tokio::time::Instant;
use tracing::instrument;

use eclat_core::{OrderNumber, PaymentMethod};

use super::{NavView, Page, PageOutcome, SummaryView};
use crate::error::Result;
use crate::filters;
use crate::services::cart::CartService;
use crate::services::checkout::{CheckoutForm, CheckoutService};
use crate::state::AppState;

/// Label on the submit button while an order is processing.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Order summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutItemView {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Payment method radio button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Checkout page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    pub nav: NavView,
    pub items: Vec<CheckoutItemView>,
    pub summary: SummaryView,
    pub payment_options: Vec<PaymentOptionView>,
    /// Card fields are shown only for card payments.
    pub show_card_fields: bool,
}

/// Display the checkout page with `selected` as the payment method.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read.
#[instrument(skip(state))]
pub fn show(state: &AppState, selected: PaymentMethod) -> Result<PageOutcome<CheckoutView>> {
    let cart = CartService::load(state)?;
    if cart.is_empty() {
        return Ok(PageOutcome::redirect(Page::Cart));
    }

    let currency = state.currency();
    let items = cart
        .lines()
        .iter()
        .map(|line| CheckoutItemView {
            name: line.name.clone(),
            quantity: line.quantity,
            line_price: filters::price(currency, line.line_total()),
        })
        .collect();
    let payment_options = PaymentMethod::ALL
        .iter()
        .map(|method| PaymentOptionView {
            value: method.as_str(),
            label: method.label(),
            selected: *method == selected,
        })
        .collect();

    Ok(PageOutcome::Render(CheckoutView {
        nav: NavView::load(state)?,
        items,
        summary: SummaryView::new(&cart.totals(), currency),
        payment_options,
        show_card_fields: selected.requires_card_details(),
    }))
}

/// A placed order waiting out the processing delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processing {
    pub order_number: OrderNumber,
    pub label: &'static str,
    deadline: Instant,
}

impl Processing {
    /// Wait for the processing delay, then return the receipt page.
    pub async fn finish(self) -> Page {
        tokio::time::sleep_until(self.deadline).await;
        Page::Receipt
    }
}

/// Submit the checkout form.
///
/// The order and the emptied cart are persisted before this returns; only the
/// navigation to the receipt waits for [`Processing::finish`].
///
/// # Errors
///
/// Returns `AppError::Checkout` for an empty cart or an invalid form.
#[instrument(skip(state, form), fields(payment_method = %form.payment_method))]
pub fn place_order(state: &AppState, form: &CheckoutForm) -> Result<PageOutcome<Processing>> {
    let order = CheckoutService::new(state).submit_order(form)?;

    Ok(PageOutcome::Render(Processing {
        order_number: order.order_number,
        label: PROCESSING_LABEL,
        deadline: Instant::now() + state.config().processing_delay,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::models::{Product, keys};
    use crate::pages::resolve;
    use crate::services::auth::AuthService;
    use crate::services::catalog::Catalog;
    use eclat_core::ProductId;

    fn state_with_cart() -> AppState {
        let config = StorefrontConfig {
            processing_delay: Duration::from_millis(1),
            ..StorefrontConfig::default()
        };
        let state = AppState::in_memory(config);
        let auth = AuthService::new(&state);
        let password = SecretString::from("rosewater");
        auth.signup("Ava", "ava@mail.com", &password).unwrap();
        auth.login("ava@mail.com", &password).unwrap();

        let catalog = Catalog::default_collection();
        let product: &Product = catalog.find(&ProductId::new("citrus-bloom")).unwrap();
        CartService::load(&state).unwrap().add(product).unwrap();
        state
    }

    fn form() -> CheckoutForm {
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
            payment_method: PaymentMethod::Cod,
            card: None,
        }
    }

    #[test]
    fn test_empty_cart_redirects_to_cart() {
        let state = AppState::in_memory(StorefrontConfig::default());
        assert_eq!(
            show(&state, PaymentMethod::Card).unwrap(),
            PageOutcome::redirect(Page::Cart)
        );
    }

    #[test]
    fn test_show_summary_and_payment_options() {
        let state = state_with_cart();
        let view = show(&state, PaymentMethod::Upi)
            .unwrap()
            .into_view()
            .unwrap();

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].line_price, "₹3,735");
        assert_eq!(view.summary.shipping, "₹50");
        assert_eq!(view.payment_options.len(), 4);
        assert!(view.payment_options[2].selected);
        assert_eq!(view.payment_options[2].label, "UPI Payment");
        assert!(!view.show_card_fields);
    }

    #[test]
    fn test_invalid_form_alerts_and_keeps_cart() {
        let state = state_with_cart();
        let mut submitted = form();
        submitted.zip = String::new();

        assert_eq!(
            resolve(place_order(&state, &submitted)),
            PageOutcome::Alert("Please fill in your zip".to_string())
        );
        assert!(!CartService::load(&state).unwrap().is_empty());
    }

    #[test]
    fn test_card_without_details_alerts() {
        let state = state_with_cart();
        let mut submitted = form();
        submitted.payment_method = PaymentMethod::Card;

        assert_eq!(
            resolve(place_order(&state, &submitted)),
            PageOutcome::Alert("Please fill in all card details".to_string())
        );
    }

    #[tokio::test]
    async fn test_place_order_then_receipt() {
        let state = state_with_cart();

        let processing = place_order(&state, &form()).unwrap().into_view().unwrap();
        assert_eq!(processing.label, "Processing...");
        assert!(state.local().raw(keys::LAST_ORDER).unwrap().is_some());
        assert!(CartService::load(&state).unwrap().is_empty());

        assert_eq!(processing.finish().await, Page::Receipt);
    }
}
