//! Cart page.
//!
//! Lines are addressed by their position in the cart, as rendered.

use tracing::instrument;

use eclat_core::DisplayCurrency;

use super::{NavView, Page, PageOutcome, SummaryView, require_login};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::CartLine;
use crate::models::product::PLACEHOLDER_IMAGE;
use crate::services::cart::CartService;
use crate::state::AppState;

/// Notes shown for lines without their own.
const DEFAULT_NOTES: &str = "Luxury Fragrance";

const LOGIN_TO_VIEW_CART: &str = "Please login to view your cart!";

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub notes: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(index: usize, line: &CartLine, currency: &DisplayCurrency) -> Self {
        Self {
            index,
            id: line.id.to_string(),
            name: line.name.clone(),
            notes: non_empty_or(&line.notes, DEFAULT_NOTES),
            image: non_empty_or(&line.image, PLACEHOLDER_IMAGE),
            quantity: line.quantity,
            price: filters::price(currency, line.price),
            line_price: filters::price(currency, line.line_total()),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub nav: NavView,
    pub items: Vec<CartItemView>,
    pub summary: SummaryView,
    pub item_count: u64,
}

impl CartView {
    /// Whether to show the empty-cart panel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

fn render(state: &AppState, cart: &CartService<'_>) -> Result<PageOutcome<CartView>> {
    let currency = state.currency();
    Ok(PageOutcome::Render(CartView {
        nav: NavView::load(state)?,
        items: cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartItemView::new(index, line, currency))
            .collect(),
        summary: SummaryView::new(&cart.totals(), currency),
        item_count: cart.count(),
    }))
}

/// Display the cart page.
///
/// # Errors
///
/// Returns `AppError::AccessDenied` when nobody is logged in.
#[instrument(skip(state))]
pub fn show(state: &AppState) -> Result<PageOutcome<CartView>> {
    require_login(state, LOGIN_TO_VIEW_CART)?;
    let cart = CartService::load(state)?;
    render(state, &cart)
}

/// The minus and plus buttons on a line.
///
/// # Errors
///
/// Returns `AppError::AccessDenied` when nobody is logged in.
#[instrument(skip(state))]
pub fn update_quantity(state: &AppState, index: usize, delta: i64) -> Result<PageOutcome<CartView>> {
    require_login(state, LOGIN_TO_VIEW_CART)?;
    let mut cart = CartService::load(state)?;
    cart.update_quantity(index, delta)?;
    render(state, &cart)
}

/// The remove button on a line.
///
/// # Errors
///
/// Returns `AppError::AccessDenied` when nobody is logged in.
#[instrument(skip(state))]
pub fn remove(state: &AppState, index: usize) -> Result<PageOutcome<CartView>> {
    require_login(state, LOGIN_TO_VIEW_CART)?;
    let mut cart = CartService::load(state)?;
    cart.remove(index)?;
    render(state, &cart)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `AppError::AccessDenied` when nobody is logged in.
#[instrument(skip(state))]
pub fn clear(state: &AppState) -> Result<PageOutcome<CartView>> {
    require_login(state, LOGIN_TO_VIEW_CART)?;
    let mut cart = CartService::load(state)?;
    cart.clear()?;
    render(state, &cart)
}

/// The checkout button.
///
/// # Errors
///
/// Returns `AppError::Validation` when the cart is empty.
pub fn proceed_to_checkout(state: &AppState) -> Result<PageOutcome<()>> {
    if CartService::load(state)?.is_empty() {
        return Err(AppError::Validation("Your cart is empty!".to_string()));
    }
    Ok(PageOutcome::redirect(Page::Checkout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eclat_core::ProductId;
    use secrecy::SecretString;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::pages::{Notice, catalog, resolve};
    use crate::services::auth::AuthService;
    use crate::services::catalog::Catalog;

    fn logged_in_state() -> AppState {
        let state = AppState::in_memory(StorefrontConfig::default());
        let auth = AuthService::new(&state);
        let password = SecretString::from("rosewater");
        auth.signup("Ava", "ava@mail.com", &password).unwrap();
        auth.login("ava@mail.com", &password).unwrap();
        state
    }

    fn add(state: &AppState, id: &str) {
        catalog::add_to_cart(state, &Catalog::default_collection(), &ProductId::new(id)).unwrap();
    }

    #[test]
    fn test_logged_out_prompts_login() {
        let state = AppState::in_memory(StorefrontConfig::default());
        assert_eq!(
            resolve(show(&state)),
            PageOutcome::PromptLogin(Notice::info("Please login to view your cart!"))
        );
    }

    #[test]
    fn test_show_lines_and_summary() {
        let state = logged_in_state();
        add(&state, "sea-salt-vetiver");
        add(&state, "sea-salt-vetiver");

        let view = show(&state).unwrap().into_view().unwrap();
        assert_eq!(view.item_count, 2);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].price, "₹3,237");
        assert_eq!(view.items[0].line_price, "₹6,474");
        assert_eq!(view.summary.shipping, "FREE");
        assert_eq!(view.nav.cart_badge, Some(2));
    }

    #[test]
    fn test_defaults_for_missing_notes_and_image() {
        let state = logged_in_state();
        state
            .local()
            .set_raw(
                crate::models::keys::CART,
                r#"[{"id":"p1","name":"Mystery","price":10,"quantity":1}]"#,
            )
            .unwrap();

        let view = show(&state).unwrap().into_view().unwrap();
        assert_eq!(view.items[0].notes, "Luxury Fragrance");
        assert_eq!(view.items[0].image, "img/perfume1.png");
    }

    #[test]
    fn test_quantity_controls() {
        let state = logged_in_state();
        add(&state, "rose-noir");
        add(&state, "cedar-smoke");

        let view = update_quantity(&state, 0, 1).unwrap().into_view().unwrap();
        assert_eq!(view.items[0].quantity, 2);

        let view = update_quantity(&state, 0, -2).unwrap().into_view().unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, "cedar-smoke");

        let view = remove(&state, 0).unwrap().into_view().unwrap();
        assert!(view.is_empty());
        assert_eq!(view.summary.total, "₹0");
    }

    #[test]
    fn test_clear_requires_login() {
        let state = logged_in_state();
        add(&state, "rose-noir");
        AuthService::new(&state).logout().unwrap();
        state
            .local()
            .set_raw(
                crate::models::keys::CART,
                r#"[{"id":"rose-noir","name":"Rose Noir","price":45,"quantity":1}]"#,
            )
            .unwrap();

        assert_eq!(
            resolve(clear(&state)),
            PageOutcome::PromptLogin(Notice::info("Please login to view your cart!"))
        );
        assert_eq!(CartService::load(&state).unwrap().count(), 1);
    }

    #[test]
    fn test_clear_empties_cart() {
        let state = logged_in_state();
        add(&state, "rose-noir");
        add(&state, "cedar-smoke");

        let view = clear(&state).unwrap().into_view().unwrap();
        assert!(view.is_empty());
        assert_eq!(view.nav.cart_badge, None);
        assert!(CartService::load(&state).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_stored_price_renders() {
        let state = logged_in_state();
        state
            .local()
            .set_raw(
                crate::models::keys::CART,
                r#"[{"id":"p1","name":"A","price":1e27,"quantity":3}]"#,
            )
            .unwrap();

        let view = show(&state).unwrap().into_view().unwrap();
        assert_eq!(view.item_count, 3);
        assert!(view.summary.total.starts_with("₹79,22"));
    }

    #[test]
    fn test_checkout_button() {
        let state = logged_in_state();
        assert_eq!(
            resolve(proceed_to_checkout(&state)),
            PageOutcome::Alert("Your cart is empty!".to_string())
        );

        add(&state, "rose-noir");
        assert_eq!(
            proceed_to_checkout(&state).unwrap(),
            PageOutcome::redirect(Page::Checkout)
        );
    }
}
