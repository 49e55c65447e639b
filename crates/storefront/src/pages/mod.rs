//! Page controllers.
//!
//! One module per storefront page. Each controller reloads what it needs from
//! the stores in [`AppState`], applies the shopper's action and returns a
//! [`PageOutcome`]: a view to render, a redirect, the login prompt, a
//! notification or a blocking alert.
//!
//! # Pages
//!
//! - `home` - Landing page, intro loader and featured products
//! - `catalog` - Restricted products page with filter and sort
//! - `cart` - Cart lines, quantity controls and order summary
//! - `checkout` - Shipping and payment form
//! - `receipt` - Confirmation of the last order
//! - `account` - Signup, login and logout from the navigation bar
//! - `music` - Background music player lifecycle

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod home;
pub mod music;
pub mod receipt;

use eclat_core::DisplayCurrency;

use crate::error::{AppError, Result};
use crate::filters;
use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::services::pricing::Totals;
use crate::state::AppState;

/// Storefront pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Catalog,
    Cart,
    Checkout,
    Receipt,
}

impl Page {
    /// Path of the page document.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Catalog => "products.html",
            Self::Cart => "cart.html",
            Self::Checkout => "checkout.html",
            Self::Receipt => "receipt.html",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    /// A neutral notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// What the shopper sees after a page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<V> {
    /// Show the page.
    Render(V),
    /// Navigate elsewhere, optionally with a notification.
    Redirect { to: Page, notice: Option<Notice> },
    /// Open the login dialog with a notification.
    PromptLogin(Notice),
    /// Stay on the page and show a notification.
    Notify(Notice),
    /// Stay on the page behind a blocking alert.
    Alert(String),
}

impl<V> PageOutcome<V> {
    /// Redirect without a notification.
    #[must_use]
    pub const fn redirect(to: Page) -> Self {
        Self::Redirect { to, notice: None }
    }

    /// Transform the rendered view, keeping any other outcome.
    pub fn map_view<W>(self, f: impl FnOnce(V) -> W) -> PageOutcome<W> {
        match self {
            Self::Render(view) => PageOutcome::Render(f(view)),
            Self::Redirect { to, notice } => PageOutcome::Redirect { to, notice },
            Self::PromptLogin(notice) => PageOutcome::PromptLogin(notice),
            Self::Notify(notice) => PageOutcome::Notify(notice),
            Self::Alert(message) => PageOutcome::Alert(message),
        }
    }

    /// The rendered view, if any.
    #[must_use]
    pub fn into_view(self) -> Option<V> {
        match self {
            Self::Render(view) => Some(view),
            _ => None,
        }
    }
}

/// Collapse a controller result into what the shopper sees.
#[must_use]
pub fn resolve<V>(result: Result<PageOutcome<V>>) -> PageOutcome<V> {
    result.unwrap_or_else(AppError::into_outcome)
}

/// Navigation bar state shared by every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    /// Logged-in shopper's name.
    pub greeting: Option<String>,
    /// Cart count, shown only when logged in with a non-empty cart.
    pub cart_badge: Option<u64>,
    /// Background music player visibility.
    pub music_player_visible: bool,
}

impl NavView {
    /// Build the navigation bar from the stores.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if a store cannot be read.
    pub fn load(state: &AppState) -> Result<Self> {
        let user = AuthService::new(state).current_user()?;
        let count = CartService::load(state)?.count();
        let logged_in = user.is_some();

        Ok(Self {
            greeting: user.map(|user| user.name),
            cart_badge: (logged_in && count > 0).then_some(count),
            music_player_visible: logged_in,
        })
    }
}

/// Summary rows in the display currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl SummaryView {
    /// Format `totals` for display.
    #[must_use]
    pub fn new(totals: &Totals, currency: &DisplayCurrency) -> Self {
        Self {
            subtotal: filters::price(currency, totals.subtotal),
            shipping: filters::shipping(currency, totals),
            tax: filters::price(currency, totals.tax),
            total: filters::price(currency, totals.total),
        }
    }
}

/// Fail with a login prompt unless a shopper is logged in.
fn require_login(state: &AppState, message: &str) -> Result<()> {
    if AuthService::new(state).is_logged_in()? {
        Ok(())
    } else {
        Err(AppError::AccessDenied(message.to_string()))
    }
}
