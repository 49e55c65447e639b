//! Products page.
//!
//! Only logged-in shoppers may browse the full catalog.

use tracing::instrument;

use eclat_core::{DisplayCurrency, ProductId};

use super::{NavView, Notice, Page, PageOutcome};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Product;
use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::services::catalog::{Catalog, CategoryFilter, SortOrder};
use crate::state::AppState;

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub notes: String,
    pub category: String,
    pub price: String,
    pub image: String,
}

impl ProductCardView {
    /// Card for `product` priced in `currency`.
    #[must_use]
    pub fn new(product: &Product, currency: &DisplayCurrency) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            notes: product.notes.clone(),
            category: product.category.clone(),
            price: filters::price(currency, product.price),
            image: product.image.clone(),
        }
    }
}

/// Products page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub nav: NavView,
    /// Filter buttons, `all` first.
    pub categories: Vec<String>,
    pub filter: CategoryFilter,
    pub sort: SortOrder,
    pub products: Vec<ProductCardView>,
}

/// Display the products page.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read.
#[instrument(skip(state, catalog))]
pub fn show(
    state: &AppState,
    catalog: &Catalog,
    filter: CategoryFilter,
    sort: SortOrder,
) -> Result<PageOutcome<CatalogView>> {
    if !AuthService::new(state).is_logged_in()? {
        return Ok(PageOutcome::Redirect {
            to: Page::Home,
            notice: Some(Notice::info("Please login to access products page!")),
        });
    }

    let categories = std::iter::once("all")
        .chain(catalog.categories())
        .map(str::to_owned)
        .collect();
    let products = catalog
        .browse(&filter, sort)
        .into_iter()
        .map(|product| ProductCardView::new(product, state.currency()))
        .collect();

    Ok(PageOutcome::Render(CatalogView {
        nav: NavView::load(state)?,
        categories,
        filter,
        sort,
        products,
    }))
}

/// Add one unit of a product to the cart.
///
/// Shared by the products page and the featured products on the home page.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product, or
/// `AppError::Cart` (shown as the login prompt) when nobody is logged in.
#[instrument(skip(state, catalog))]
pub fn add_to_cart(
    state: &AppState,
    catalog: &Catalog,
    product_id: &ProductId,
) -> Result<PageOutcome<()>> {
    let product = catalog
        .find(product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

    CartService::load(state)?.add(product)?;

    Ok(PageOutcome::Notify(Notice::success(format!(
        "{} added to cart!",
        product.name
    ))))
}
