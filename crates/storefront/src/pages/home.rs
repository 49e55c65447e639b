//! Home page.

use tracing::instrument;

use super::catalog::ProductCardView;
use super::{NavView, Notice, Page, PageOutcome};
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::services::catalog::Catalog;
use crate::services::loader;
use crate::state::AppState;

/// Number of products in the featured strip.
const FEATURED_COUNT: usize = 4;

/// Home page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub nav: NavView,
    /// Play the intro loader (first visit in this browsing session).
    pub show_loader: bool,
    pub featured: Vec<ProductCardView>,
}

/// Display the home page.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read or written.
#[instrument(skip(state, catalog))]
pub fn show(state: &AppState, catalog: &Catalog) -> Result<PageOutcome<HomeView>> {
    let show_loader = loader::first_visit(state.session())?;
    let featured = catalog
        .products()
        .iter()
        .take(FEATURED_COUNT)
        .map(|product| ProductCardView::new(product, state.currency()))
        .collect();

    Ok(PageOutcome::Render(HomeView {
        nav: NavView::load(state)?,
        show_loader,
        featured,
    }))
}

/// The "view all products" button.
///
/// # Errors
///
/// Returns `AppError` if the session cannot be read.
pub fn view_products(state: &AppState) -> Result<PageOutcome<()>> {
    if AuthService::new(state).is_logged_in()? {
        Ok(PageOutcome::redirect(Page::Catalog))
    } else {
        Ok(PageOutcome::PromptLogin(Notice::info("Please login to view products!")))
    }
}

/// The logo link back home, which replays the intro loader.
///
/// # Errors
///
/// Returns `AppError` if the session store cannot be written.
pub fn follow_home_link(state: &AppState) -> Result<PageOutcome<()>> {
    loader::reset(state.session())?;
    Ok(PageOutcome::redirect(Page::Home))
}
