//! Integration tests for the cart engine and pricing.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use eclat_core::{Price, ProductId};
use eclat_integration_tests::TestContext;
use eclat_storefront::models::{Cart, Product, QuantityChange, keys};
use eclat_storefront::services::cart::{CartError, CartService};
use eclat_storefront::services::pricing::compute_totals;

fn product(id: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: id.to_uppercase(),
        price: Price::from_cents(cents),
        image: String::new(),
        notes: String::new(),
        category: "unisex".to_owned(),
    }
}

fn assert_cart_invariants(cart: &Cart) {
    let summed: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
    assert_eq!(cart.count(), summed);

    let ids: HashSet<_> = cart.lines().iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids.len(), cart.lines().len(), "duplicate line ids");
    assert!(cart.lines().iter().all(|l| l.quantity > 0));
}

// =============================================================================
// Cart Engine
// =============================================================================

#[test]
fn test_add_same_product_twice_merges() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");

    let mut cart = CartService::load(&ctx.state).unwrap();
    let p1 = product("p1", 1000);
    assert_eq!(cart.add(&p1).unwrap(), 1);
    assert_eq!(cart.add(&p1).unwrap(), 2);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.totals().subtotal, Price::from_cents(2000));
}

#[test]
fn test_count_matches_quantities_after_mixed_actions() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");
    let mut cart = CartService::load(&ctx.state).unwrap();

    let products = [product("a", 500), product("b", 1500), product("c", 2500)];
    for (step, p) in products.iter().cycle().take(9).enumerate() {
        cart.add(p).unwrap();
        if step % 4 == 3 {
            cart.update_quantity(step % 3, -1).unwrap();
        }
        assert_cart_invariants(cart.cart());
    }

    cart.remove(1).unwrap();
    assert_cart_invariants(cart.cart());
    cart.update_quantity(0, 5).unwrap();
    assert_cart_invariants(cart.cart());

    let reloaded = CartService::load(&ctx.state).unwrap();
    assert_eq!(reloaded.cart(), cart.cart());
}

#[test]
fn test_decrement_to_zero_removes_line() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");
    let mut cart = CartService::load(&ctx.state).unwrap();
    cart.add(&product("p1", 1000)).unwrap();
    cart.add(&product("p1", 1000)).unwrap();

    assert_eq!(cart.update_quantity(0, -2).unwrap(), QuantityChange::Removed);
    assert!(cart.is_empty());
    assert_eq!(cart.count(), 0);
}

#[test]
fn test_out_of_range_index_is_ignored() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");
    let mut cart = CartService::load(&ctx.state).unwrap();
    cart.add(&product("p1", 1000)).unwrap();

    assert_eq!(cart.update_quantity(3, 1).unwrap(), QuantityChange::Unchanged);
    assert_eq!(cart.remove(3).unwrap(), None);
    assert_eq!(cart.count(), 1);
}

#[test]
fn test_add_requires_login() {
    let ctx = TestContext::new();
    let mut cart = CartService::load(&ctx.state).unwrap();

    assert!(matches!(
        cart.add(&product("p1", 1000)),
        Err(CartError::LoginRequired)
    ));
    assert_eq!(ctx.state.local().raw(keys::CART).unwrap(), None);
}

#[test]
fn test_persisted_cart_reloads_in_order() {
    let ctx = TestContext::new();
    ctx.login_as("Ava", "ava@mail.com");
    let mut cart = CartService::load(&ctx.state).unwrap();
    for id in ["velvet-iris", "oud-royale", "cedar-smoke"] {
        cart.add(ctx.product(id)).unwrap();
    }

    let reloaded = CartService::load(&ctx.state).unwrap();
    let ids: Vec<_> = reloaded.lines().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["velvet-iris", "oud-royale", "cedar-smoke"]);
}

// =============================================================================
// Pricing
// =============================================================================

#[test]
fn test_empty_cart_totals_are_zero() {
    let totals = compute_totals(&Cart::new());
    assert_eq!(totals.subtotal, Price::ZERO);
    assert_eq!(totals.shipping, Price::ZERO);
    assert_eq!(totals.tax, Price::ZERO);
    assert_eq!(totals.total, Price::ZERO);
}

#[test]
fn test_small_order_pays_flat_shipping() {
    let mut cart = Cart::new();
    for _ in 0..4 {
        cart.add(&product("p1", 1000));
    }

    let totals = compute_totals(&cart);
    assert_eq!(totals.subtotal, Price::from_cents(4000));
    assert_eq!(totals.shipping, Price::from_cents(60));
    assert_eq!(totals.tax, Price::from_cents(400));
    assert_eq!(totals.total, Price::from_cents(4460));
}

#[test]
fn test_large_order_ships_free() {
    let mut cart = Cart::new();
    cart.add(&product("p1", 10000));

    let totals = compute_totals(&cart);
    assert_eq!(totals.shipping, Price::ZERO);
    assert!(totals.ships_free());
    assert_eq!(totals.tax, Price::from_cents(1000));
    assert_eq!(totals.total, Price::from_cents(11000));
}

#[test]
fn test_threshold_is_exclusive() {
    let mut cart = Cart::new();
    cart.add(&product("p1", 5000));

    assert_eq!(compute_totals(&cart).shipping, Price::from_cents(60));
}
