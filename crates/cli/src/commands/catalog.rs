//! Home and products page commands.

use std::path::Path;

use serde::Deserialize;

use eclat_storefront::models::Product;
use eclat_storefront::pages::{self, catalog::ProductCardView, home};
use eclat_storefront::services::catalog::{Catalog, CategoryFilter, SortOrder};
use eclat_storefront::state::AppState;

use crate::error::CliError;
use crate::output;

/// Layout of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Load a YAML catalog, or the built-in collection when no file is given.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read or parsed.
pub async fn load(file: Option<&Path>) -> Result<Catalog, CliError> {
    let Some(path) = file else {
        return Ok(Catalog::default_collection());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
    let parsed: CatalogFile =
        serde_yaml::from_str(&content).map_err(|source| CliError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), products = parsed.products.len(), "Loaded catalog");
    Ok(Catalog::new(parsed.products))
}

fn print_card(card: &ProductCardView) {
    println!(
        "  {:<20} {:<22} {:>10}  {}",
        card.id, card.name, card.price, card.notes
    );
}

/// Show the home page.
pub fn home(state: &AppState, catalog: &Catalog, replay_intro: bool) {
    if replay_intro {
        let followed = pages::resolve(home::follow_home_link(state));
        if !matches!(followed, pages::PageOutcome::Redirect { .. }) {
            output::action(followed);
            return;
        }
    }

    output::outcome(pages::resolve(home::show(state, catalog)), |view| {
        if view.show_loader {
            println!("Éclat Essence");
            println!("Luxury fragrances, timeless memories");
            println!();
        }
        if let Some(name) = &view.nav.greeting {
            println!("Welcome, {name}");
        }
        println!("Featured");
        view.featured.iter().for_each(print_card);
    });
}

/// Show the products page.
pub fn browse(state: &AppState, catalog: &Catalog, filter: CategoryFilter, sort: SortOrder) {
    let outcome = pages::resolve(pages::catalog::show(state, catalog, filter, sort));
    output::outcome(outcome, |view| {
        println!("Categories: {}", view.categories.join(", "));
        if view.products.is_empty() {
            println!("  No products in this category");
        }
        view.products.iter().for_each(print_card);
    });
}
