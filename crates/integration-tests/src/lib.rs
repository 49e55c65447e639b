//! Integration tests for the Éclat Essence storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p eclat-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart` - Cart engine and pricing properties
//! - `auth` - Signup, login, logout and the access gate
//! - `checkout` - Order submission and the receipt
//! - `storage` - File-backed stores across restarts
//!
//! Every test gets its own [`TestContext`], backed by in-memory stores unless
//! it opts into a temporary data directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use eclat_core::{PaymentMethod, ProductId};
use eclat_storefront::config::StorefrontConfig;
use eclat_storefront::models::Product;
use eclat_storefront::services::auth::AuthService;
use eclat_storefront::services::catalog::Catalog;
use eclat_storefront::services::checkout::CheckoutForm;
use eclat_storefront::state::AppState;
use eclat_storefront::storage::StorageError;

/// Password used for every test shopper.
pub const TEST_PASSWORD: &str = "rosewater";

/// A storefront with its catalog.
pub struct TestContext {
    pub state: AppState,
    pub catalog: Catalog,
}

impl TestContext {
    /// Storefront backed by in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::in_memory(test_config(std::env::temp_dir())),
            catalog: Catalog::default_collection(),
        }
    }

    /// Storefront backed by JSON files under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stores cannot be opened.
    pub fn on_disk(data_dir: PathBuf) -> Result<Self, StorageError> {
        Ok(Self {
            state: AppState::open(test_config(data_dir))?,
            catalog: Catalog::default_collection(),
        })
    }

    /// Auth service over this storefront.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.state)
    }

    /// Register `email` and log in as that shopper.
    ///
    /// # Panics
    ///
    /// Panics if signup or login fails.
    #[allow(clippy::unwrap_used)]
    pub fn login_as(&self, name: &str, email: &str) {
        let password = SecretString::from(TEST_PASSWORD);
        let auth = self.auth();
        if auth.login(email, &password).is_err() {
            auth.signup(name, email, &password).unwrap();
            auth.login(email, &password).unwrap();
        }
    }

    /// A catalog product by id.
    ///
    /// # Panics
    ///
    /// Panics if the product is not in the catalog.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn product(&self, id: &str) -> &Product {
        self.catalog.find(&ProductId::new(id)).unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A unique scratch directory under the system temp dir.
#[must_use]
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("eclat-it-{}", uuid::Uuid::new_v4()))
}

/// A complete checkout form paying with `method`.
#[must_use]
pub fn checkout_form(method: PaymentMethod) -> CheckoutForm {
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

fn test_config(data_dir: PathBuf) -> StorefrontConfig {
    StorefrontConfig {
        data_dir,
        processing_delay: Duration::from_millis(1),
        ..StorefrontConfig::default()
    }
}
