//! Receipt page for the most recent order.

use std::fmt;

use chrono::{Local, TimeZone};
use tracing::instrument;

use super::{NavView, Page, PageOutcome, SummaryView};
use crate::error::Result;
use crate::filters;
use crate::models::Order;
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

const STORE_NAME: &str = "Éclat Essence";
const TAGLINE: &str = "Luxury fragrances, timeless memories";
const SUPPORT_EMAIL: &str = "support@eclatessence.com";

/// Shipping and contact details as shown on the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl CustomerView {
    /// Shipping block lines: name, street, `city, state zip`, country, then
    /// contact lines.
    #[must_use]
    pub fn shipping_lines(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            format!("{}, {} {}", self.city, self.state, self.zip),
            self.country.clone(),
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone),
        ]
    }
}

/// Ordered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl ReceiptItemView {
    /// The `Quantity: 2 × ₹3,237` line under the item name.
    #[must_use]
    pub fn quantity_line(&self) -> String {
        format!("Quantity: {} × {}", self.quantity, self.unit_price)
    }
}

/// Receipt display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    pub nav: NavView,
    pub order_number: String,
    pub order_date: String,
    pub payment_method: &'static str,
    pub customer: CustomerView,
    pub items: Vec<ReceiptItemView>,
    pub summary: SummaryView,
}

impl ReceiptView {
    fn new<Tz>(state: &AppState, order: &Order, tz: &Tz) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let currency = state.currency();
        let customer = &order.customer;

        Ok(Self {
            nav: NavView::load(state)?,
            order_number: order.order_number.to_string(),
            order_date: filters::order_date(order.order_date, tz),
            payment_method: order.payment_method.label(),
            customer: CustomerView {
                name: customer.full_name(),
                email: customer.email.to_string(),
                phone: customer.phone.clone(),
                address: customer.address.clone(),
                city: customer.city.clone(),
                state: customer.state.clone(),
                zip: customer.zip.clone(),
                country: customer.country.clone(),
            },
            items: order
                .cart
                .lines()
                .iter()
                .map(|line| ReceiptItemView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: filters::price(currency, line.price),
                    line_total: filters::price(currency, line.line_total()),
                })
                .collect(),
            summary: SummaryView::new(&order.totals, currency),
        })
    }

    /// Printable plain-text rendering.
    #[must_use]
    pub const fn printable(&self) -> PrintableReceipt<'_> {
        PrintableReceipt(self)
    }

    /// The printable receipt as a string.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.printable().to_string()
    }
}

/// Plain-text receipt suitable for printing.
pub struct PrintableReceipt<'a>(&'a ReceiptView);

impl fmt::Display for PrintableReceipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receipt = self.0;
        let customer = &receipt.customer;
        let summary = &receipt.summary;

        writeln!(f, "{STORE_NAME}")?;
        writeln!(f, "{TAGLINE}")?;
        writeln!(f)?;
        writeln!(f, "ORDER RECEIPT")?;
        writeln!(f)?;
        writeln!(f, "Order Number:   {}", receipt.order_number)?;
        writeln!(f, "Order Date:     {}", receipt.order_date)?;
        writeln!(f, "Payment Method: {}", receipt.payment_method)?;
        writeln!(f)?;

        writeln!(f, "Customer Information")?;
        writeln!(f, "  {}", customer.name)?;
        writeln!(f, "  Email: {}", customer.email)?;
        writeln!(f, "  Phone: {}", customer.phone)?;
        writeln!(f)?;
        writeln!(f, "Shipping Address")?;
        writeln!(f, "  {}", customer.address)?;
        writeln!(f, "  {}, {}", customer.city, customer.state)?;
        writeln!(f, "  {}, {}", customer.zip, customer.country)?;
        writeln!(f)?;

        writeln!(f, "Order Items")?;
        writeln!(f, "{:<28} {:>4} {:>12} {:>12}", "Product", "Qty", "Unit Price", "Total")?;
        for item in &receipt.items {
            writeln!(
                f,
                "{:<28} {:>4} {:>12} {:>12}",
                item.name, item.quantity, item.unit_price, item.line_total
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{:<16}{:>12}", "Subtotal:", summary.subtotal)?;
        writeln!(f, "{:<16}{:>12}", "Shipping:", summary.shipping)?;
        writeln!(f, "{:<16}{:>12}", "Tax (10%):", summary.tax)?;
        writeln!(f, "{}", "-".repeat(28))?;
        writeln!(f, "{:<16}{:>12}", "TOTAL PAID:", summary.total)?;
        writeln!(f)?;

        writeln!(f, "Thank You for Your Purchase!")?;
        writeln!(f, "For any queries, contact us at {SUPPORT_EMAIL}")
    }
}

/// Display the receipt with dates in the local time zone.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read.
pub fn show(state: &AppState) -> Result<PageOutcome<ReceiptView>> {
    show_in(state, &Local)
}

/// Display the receipt with dates in `tz`.
///
/// Redirects home when no order has been placed.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read.
#[instrument(skip(state, tz))]
pub fn show_in<Tz>(state: &AppState, tz: &Tz) -> Result<PageOutcome<ReceiptView>>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(order) = CheckoutService::new(state).last_order()? else {
        return Ok(PageOutcome::redirect(Page::Home));
    };

    Ok(PageOutcome::Render(ReceiptView::new(state, &order, tz)?))
}
