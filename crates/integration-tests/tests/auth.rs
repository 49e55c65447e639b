//! Integration tests for accounts, the session and the access gate.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use secrecy::SecretString;

use eclat_integration_tests::{TEST_PASSWORD, TestContext};
use eclat_storefront::models::keys;
use eclat_storefront::pages::{self, Notice, Page, PageOutcome};
use eclat_storefront::services::auth::{AuthError, SessionState};
use eclat_storefront::services::cart::CartService;
use eclat_storefront::services::catalog::{CategoryFilter, SortOrder};

// =============================================================================
// Accounts
// =============================================================================

#[test]
fn test_duplicate_signup_leaves_users_unchanged() {
    let ctx = TestContext::new();
    let password = SecretString::from(TEST_PASSWORD);
    ctx.auth().signup("Ava", "ava@mail.com", &password).unwrap();
    let before = ctx.state.local().raw(keys::USERS).unwrap();

    let again = ctx.auth().signup("Other Ava", "ava@mail.com", &password);
    assert!(matches!(again, Err(AuthError::DuplicateEmail)));
    assert_eq!(ctx.state.local().raw(keys::USERS).unwrap(), before);
}

#[test]
fn test_passwords_are_not_stored_in_plaintext() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");

    let stored = ctx.state.local().raw(keys::USERS).unwrap().unwrap();
    assert!(!stored.contains(TEST_PASSWORD));
    assert!(stored.contains("$argon2"));
}

#[test]
fn test_wrong_password_keeps_session_logged_out() {
    let ctx = TestContext::new();
    let password = SecretString::from(TEST_PASSWORD);
    ctx.auth().signup("Ava", "ava@mail.com", &password).unwrap();

    let wrong = ctx
        .auth()
        .login("ava@mail.com", &SecretString::from("lavender"));
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    assert_eq!(ctx.auth().session().unwrap(), SessionState::LoggedOut);
}

#[test]
fn test_malformed_session_reads_as_logged_out() {
    let ctx = TestContext::new();
    ctx.state
        .local()
        .set_raw(keys::CURRENT_USER, "{not json")
        .unwrap();

    assert!(!ctx.auth().is_logged_in().unwrap());
    assert_eq!(pages::NavView::load(&ctx.state).unwrap().greeting, None);
}

// =============================================================================
// Login / Logout Lifecycle
// =============================================================================

#[test]
fn test_login_permits_add_and_logout_empties_cart() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");
    assert!(matches!(
        ctx.auth().session().unwrap(),
        SessionState::LoggedIn(user) if user.name == "Ava"
    ));

    let mut cart = CartService::load(&ctx.state).unwrap();
    cart.add(ctx.product("rose-noir")).unwrap();
    assert_eq!(cart.count(), 1);

    ctx.auth().logout().unwrap();
    assert_eq!(ctx.auth().session().unwrap(), SessionState::LoggedOut);
    assert!(CartService::load(&ctx.state).unwrap().is_empty());
    assert_eq!(
        ctx.state.local().raw(keys::CART).unwrap().as_deref(),
        Some("[]")
    );
}

// =============================================================================
// Access Gate
// =============================================================================

#[test]
fn test_logged_out_pages_prompt_or_redirect() {
    let ctx = TestContext::new();

    assert_eq!(
        pages::resolve(pages::cart::show(&ctx.state)),
        PageOutcome::PromptLogin(Notice::info("Please login to view your cart!"))
    );
    assert_eq!(
        pages::resolve(pages::catalog::show(
            &ctx.state,
            &ctx.catalog,
            CategoryFilter::All,
            SortOrder::Featured,
        )),
        PageOutcome::Redirect {
            to: Page::Home,
            notice: Some(Notice::info("Please login to access products page!")),
        }
    );
    assert_eq!(
        pages::resolve(pages::home::view_products(&ctx.state)),
        PageOutcome::PromptLogin(Notice::info("Please login to view products!"))
    );
}

#[test]
fn test_gate_opens_after_login() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");

    let view = pages::catalog::show(&ctx.state, &ctx.catalog, CategoryFilter::All, SortOrder::Name)
        .unwrap()
        .into_view()
        .unwrap();
    assert_eq!(view.products.len(), 8);
    assert_eq!(view.products[0].name, "Cedar Smoke");
    assert!(view.nav.music_player_visible);
}
