//! Cart page commands.

use eclat_core::ProductId;
use eclat_storefront::pages::{self, cart::CartView, catalog};
use eclat_storefront::services::catalog::Catalog;
use eclat_storefront::state::AppState;

use crate::output;

fn print_cart(view: CartView) {
    if view.is_empty() {
        println!("Your cart is empty");
        return;
    }

    println!("Cart ({} items)", view.item_count);
    for item in &view.items {
        println!(
            "  [{}] {:<22} {:>3} × {:>8} {:>10}  {}",
            item.index, item.name, item.quantity, item.price, item.line_price, item.notes
        );
    }
    println!();
    output::summary(&view.summary);
}

/// Show the cart.
pub fn show(state: &AppState) {
    output::outcome(pages::resolve(pages::cart::show(state)), print_cart);
}

/// Add one unit of a product.
pub fn add(state: &AppState, catalog: &Catalog, product_id: &str) {
    let product_id = ProductId::new(product_id);
    output::action(pages::resolve(catalog::add_to_cart(state, catalog, &product_id)));
}

/// Change a line's quantity.
pub fn update(state: &AppState, index: usize, delta: i64) {
    output::outcome(
        pages::resolve(pages::cart::update_quantity(state, index, delta)),
        print_cart,
    );
}

/// Remove a line.
pub fn remove(state: &AppState, index: usize) {
    output::outcome(pages::resolve(pages::cart::remove(state, index)), print_cart);
}

/// Empty the cart.
pub fn clear(state: &AppState) {
    output::outcome(pages::resolve(pages::cart::clear(state)), print_cart);
}

/// Continue to checkout.
pub fn proceed(state: &AppState) {
    output::action(pages::resolve(pages::cart::proceed_to_checkout(state)));
}
