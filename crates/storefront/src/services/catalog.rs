//! Product catalog.
//!
//! A fixed list of products in "featured" order, with the category filter
//! and sort options offered on the products page.

use std::cmp::Ordering;
use std::str::FromStr;

use eclat_core::{Price, ProductId};

use crate::models::Product;
use crate::models::product::PLACEHOLDER_IMAGE;

/// Which categories to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Only products whose category equals this slug.
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => Self::All,
            category => Self::Only(category.to_owned()),
        })
    }
}

impl CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

/// Product ordering on the products page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Name,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "unknown sort order: {other} (expected featured, price-low, price-high or name)"
            )),
        }
    }
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

/// The products on sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_collection()
    }
}

impl Catalog {
    /// A catalog of `products` in the given featured order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The house collection.
    #[must_use]
    pub fn default_collection() -> Self {
        let entry = |id: &str, name: &str, cents: i64, notes: &str, category: &str| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_cents(cents),
            image: PLACEHOLDER_IMAGE.to_owned(),
            notes: notes.to_owned(),
            category: category.to_owned(),
        };

        Self::new(vec![
            entry("oud-royale", "Oud Royale", 12_000, "Oud, Saffron, Leather", "men"),
            entry("rose-noir", "Rose Noir", 9_500, "Black Rose, Patchouli, Vanilla", "women"),
            entry("citrus-bloom", "Citrus Bloom", 4_500, "Bergamot, Neroli, White Musk", "unisex"),
            entry("midnight-amber", "Midnight Amber", 8_500, "Amber, Tonka, Sandalwood", "men"),
            entry("velvet-iris", "Velvet Iris", 7_800, "Iris, Violet, Cashmere", "women"),
            entry("sea-salt-vetiver", "Sea Salt Vetiver", 3_900, "Sea Salt, Vetiver, Sage", "unisex"),
            entry("golden-jasmine", "Golden Jasmine", 11_000, "Jasmine, Honey, Benzoin", "women"),
            entry("cedar-smoke", "Cedar Smoke", 6_500, "Cedarwood, Birch Tar, Pepper", "men"),
        ])
    }

    /// Every product in featured order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !product.category.is_empty() && !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Products matching `filter`, ordered by `sort`.
    ///
    /// Products that compare equal keep their featured order.
    #[must_use]
    pub fn browse(&self, filter: &CategoryFilter, sort: SortOrder) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .collect();
        products.sort_by(|a, b| sort.compare(a, b));
        products
    }
}
