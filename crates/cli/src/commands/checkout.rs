//! Checkout and receipt commands.

use eclat_storefront::pages::{self, PageOutcome, receipt::ReceiptView};
use eclat_storefront::services::checkout::CheckoutForm;
use eclat_storefront::state::AppState;

use crate::output;

/// Submit the cart as an order, wait out processing, then show the receipt.
pub async fn place_order(state: &AppState, form: CheckoutForm) {
    match pages::resolve(pages::checkout::place_order(state, &form)) {
        PageOutcome::Render(processing) => {
            println!("{} Order {}", processing.label, processing.order_number);
            let next = processing.finish().await;
            tracing::debug!(page = %next, "Processing finished");
            receipt(state, false);
        }
        other => output::action(other.map_view(|_| ())),
    }
}

fn print_receipt(view: &ReceiptView) {
    println!("Order Confirmed!");
    println!("  Order number:   {}", view.order_number);
    println!("  Date:           {}", view.order_date);
    println!("  Payment method: {}", view.payment_method);
    println!();
    println!("Shipping to");
    for line in view.customer.shipping_lines() {
        println!("  {line}");
    }
    println!();
    println!("Items");
    for item in &view.items {
        println!("  {:<22} {:>10}", item.name, item.line_total);
        println!("    {}", item.quantity_line());
    }
    println!();
    output::summary(&view.summary);
}

/// Show the last order, or its printable receipt.
pub fn receipt(state: &AppState, print: bool) {
    output::outcome(pages::resolve(pages::receipt::show(state)), |view| {
        if print {
            print!("{}", view.printable());
        } else {
            print_receipt(&view);
        }
    });
}
