//! Unified error handling for page controllers.
//!
//! Every controller returns `Result<PageOutcome<V>>`. [`AppError`] turns a
//! failure into what the shopper sees: a blocking alert, a transient
//! notification, the login prompt or a redirect. Nothing is fatal; storage
//! failures are logged and shown as a generic notice.

use thiserror::Error;

use crate::pages::{Notice, Page, PageOutcome};
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Message shown for failures the shopper cannot fix.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing a store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Signup or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// User input was rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The page or action requires a logged-in shopper.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// What the shopper sees for this error.
    #[must_use]
    pub fn into_outcome<V>(self) -> PageOutcome<V> {
        if self.is_internal() {
            tracing::error!(error = %self, "Storefront error");
            return PageOutcome::Notify(Notice::error(GENERIC_FAILURE));
        }

        match self {
            Self::Auth(err) => PageOutcome::Notify(Notice::error(auth_message(&err))),
            Self::Cart(CartError::LoginRequired) => {
                PageOutcome::PromptLogin(Notice::info("Please login to add items to cart!"))
            }
            Self::Checkout(CheckoutError::EmptyCart) => PageOutcome::Redirect {
                to: Page::Cart,
                notice: None,
            },
            Self::Checkout(err) => PageOutcome::Alert(checkout_message(&err)),
            Self::Validation(message) => PageOutcome::Alert(message),
            Self::AccessDenied(message) => PageOutcome::PromptLogin(Notice::info(message)),
            Self::NotFound(what) => PageOutcome::Notify(Notice::error(format!("{what} not found"))),
            // Internal errors were handled above.
            Self::Storage(_) | Self::Cart(CartError::Storage(_)) => {
                PageOutcome::Notify(Notice::error(GENERIC_FAILURE))
            }
        }
    }

    fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Auth(AuthError::Storage(_) | AuthError::PasswordHash)
                | Self::Cart(CartError::Storage(_))
                | Self::Checkout(CheckoutError::Storage(_))
        )
    }
}

/// Don't expose internal error details to shoppers.
fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials => "Invalid email or password",
        AuthError::DuplicateEmail => "Email already registered",
        AuthError::InvalidEmail(_) => "Please enter a valid email address",
        AuthError::MissingName => "Please enter your name",
        AuthError::MissingPassword => "Please enter your password",
        AuthError::PasswordHash | AuthError::Storage(_) => GENERIC_FAILURE,
    }
    .to_string()
}

fn checkout_message(err: &CheckoutError) -> String {
    match err {
        CheckoutError::MissingField(field) => format!("Please fill in your {field}"),
        CheckoutError::InvalidEmail(_) => "Please enter a valid email address".to_string(),
        CheckoutError::MissingCardDetails => "Please fill in all card details".to_string(),
        CheckoutError::EmptyCart => "Your cart is empty!".to_string(),
        CheckoutError::Storage(_) => GENERIC_FAILURE.to_string(),
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
