//! Integration tests for the file-backed stores.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use eclat_core::PaymentMethod;
use eclat_integration_tests::{TestContext, checkout_form, temp_data_dir};
use eclat_storefront::models::keys;
use eclat_storefront::pages;
use eclat_storefront::services::cart::CartService;
use eclat_storefront::services::checkout::CheckoutService;
use eclat_storefront::state::{LOCAL_STORE_FILE, SESSION_STORE_FILE};
use eclat_storefront::storage::StorageError;

#[test]
fn test_session_and_cart_survive_restart() {
    let dir = temp_data_dir();
    {
        let ctx = TestContext::on_disk(dir.clone()).unwrap();
        ctx.login_as("Ava", "ava@mail.com");
        let mut cart = CartService::load(&ctx.state).unwrap();
        cart.add(ctx.product("golden-jasmine")).unwrap();
        cart.add(ctx.product("golden-jasmine")).unwrap();
    }

    let ctx = TestContext::on_disk(dir.clone()).unwrap();
    assert!(ctx.auth().is_logged_in().unwrap());
    let cart = CartService::load(&ctx.state).unwrap();
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_order_survives_restart() {
    let dir = temp_data_dir();
    let placed = {
        let ctx = TestContext::on_disk(dir.clone()).unwrap();
        ctx.login_as("Ava", "ava@mail.com");
        CartService::load(&ctx.state)
            .unwrap()
            .add(ctx.product("rose-noir"))
            .unwrap();
        CheckoutService::new(&ctx.state)
            .submit_order(&checkout_form(PaymentMethod::Upi))
            .unwrap()
    };

    let ctx = TestContext::on_disk(dir.clone()).unwrap();
    let stored = CheckoutService::new(&ctx.state).last_order().unwrap();
    assert_eq!(stored, Some(placed));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_loader_flag_lives_in_session_file_only() {
    let dir = temp_data_dir();
    let ctx = TestContext::on_disk(dir.clone()).unwrap();
    pages::home::show(&ctx.state, &ctx.catalog).unwrap();

    let session = fs::read_to_string(dir.join(SESSION_STORE_FILE)).unwrap();
    assert!(session.contains(keys::LOADER_SHOWN));
    let local = fs::read_to_string(dir.join(LOCAL_STORE_FILE)).unwrap_or_default();
    assert!(!local.contains(keys::LOADER_SHOWN));

    ctx.state.end_browsing_session().unwrap();
    let reopened = TestContext::on_disk(dir.clone()).unwrap();
    assert_eq!(reopened.state.session().raw(keys::LOADER_SHOWN).unwrap(), None);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_corrupt_store_file_is_reported() {
    let dir = temp_data_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(LOCAL_STORE_FILE), "{ truncated").unwrap();

    let result = TestContext::on_disk(dir.clone());
    assert!(matches!(result, Err(StorageError::CorruptFile { .. })));

    fs::remove_dir_all(dir).ok();
}
